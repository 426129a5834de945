//! Error types for database operations.

use thiserror::Error;

/// Errors that can occur during database operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Native DB error.
    #[error("Database error: {0}")]
    Database(String),

    /// Row not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate primary or unique secondary key.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Optimistic lock failure: the row changed (or vanished) since it was read.
    #[error("Conflicting state: {0}")]
    ConflictingState(String),

    /// The caller cancelled the operation; the transaction was rolled back.
    #[error("Operation cancelled")]
    Cancelled,

    /// Write attempted through a read-only transaction.
    #[error("Transaction is read-only")]
    ReadOnly,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn not_found(what: impl std::fmt::Display) -> Self {
        Error::NotFound(what.to_string())
    }

    pub(crate) fn conflict(what: impl std::fmt::Display) -> Self {
        Error::ConflictingState(what.to_string())
    }

    /// Whether re-issuing the operation may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::ConflictingState(_) | Error::DuplicateKey(_) | Error::Cancelled
        )
    }
}

impl From<native_db::db_type::Error> for Error {
    fn from(err: native_db::db_type::Error) -> Self {
        match err {
            native_db::db_type::Error::DuplicateKey { key_name } => Error::DuplicateKey(key_name),
            other => Error::Database(other.to_string()),
        }
    }
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, Error>;
