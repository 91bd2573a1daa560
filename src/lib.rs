use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("SerializationError: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("definition {0} does not belong to any mapped package")]
    UnknownPackage(String),

    #[error("definitions {0} and {1} both map to the generated name {2}")]
    DuplicateTypeName(String, String, String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub mod resources;
pub mod schemagen;
pub mod telemetry;
