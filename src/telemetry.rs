use tracing_subscriber::{prelude::*, EnvFilter, Registry};

/// Initialize tracing.
///
/// Diagnostics go to stderr so that stdout stays reserved for the schema
/// document itself.
pub fn init() {
    let logger = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr);
    let env_filter = EnvFilter::try_from_default_env()
        .or(EnvFilter::try_new("info"))
        .unwrap();

    let collector = Registry::default().with(logger).with(env_filter);
    tracing::subscriber::set_global_default(collector).unwrap();
}
