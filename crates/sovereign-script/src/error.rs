//! Error types for sovereign-script

use thiserror::Error;

/// Catalog loading error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Duplicate definition: {0}")]
    DuplicateDefinition(String),

    /// A building refers to a resource no file defines
    #[error("Unknown resource '{resource}' referenced by building '{building}'")]
    UnknownReference { building: String, resource: String },

    #[error("Store error: {0}")]
    Store(#[from] sovereign_db::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
