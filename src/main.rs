use clap::Parser;
use tracing::error;

use kubernetes_model_gen::resources::{self, Roots};
use kubernetes_model_gen::{schemagen, telemetry};

#[derive(Debug, clap::Parser)]
struct Arguments {
    /// Output mode; only the literal `validation` retains the resources
    /// listing in the emitted schema.
    mode: Option<String>,
}

fn main() -> anyhow::Result<()> {
    telemetry::init();

    let args = Arguments::parse();

    let mut schema = match schemagen::generate::<Roots>(
        &resources::packages(),
        &resources::type_substitutions(),
        &resources::custom_names(),
        resources::SCHEMA_TITLE,
    ) {
        Ok(schema) => schema,
        Err(err) => {
            // A broken schema must never reach the pipeline; report and emit
            // nothing.
            error!("schema generation failed: {err}");
            return Ok(());
        }
    };

    if args.mode.as_deref() != Some("validation") {
        schema.resources = None;
    }

    let mut document = serde_json::to_value(&schema)?;
    schemagen::postprocess::apply(&mut document);
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
