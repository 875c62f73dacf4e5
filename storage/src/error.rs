//! Storage error types.
//!
//! Used by the reference store, the state store and callers of storage APIs.

use thiserror::Error;

/// Errors that can occur when using storage operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Nothing has been saved under this slot/key yet.
    #[error("Not found: {0}")]
    NotFound(String),
    /// Stored bytes exist but do not deserialize into the expected type.
    #[error("Corrupt data: {0}")]
    CorruptData(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}
