//! Error types for the kulture node.

use kulture_core::{KlusterError, ValidationError};
use thiserror::Error;

/// Result type for node operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in node operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Record failed validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Kluster could not be built
    #[error("Kluster error: {0}")]
    Kluster(#[from] KlusterError),

    /// Id already stored
    #[error("Duplicate id: {0}")]
    Duplicate(String),

    /// Not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad configuration value
    #[error("Config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rocksdb::Error> for Error {
    fn from(e: rocksdb::Error) -> Self {
        Error::Storage(e.to_string())
    }
}
