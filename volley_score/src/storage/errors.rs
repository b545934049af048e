//! Storage error types.

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key that cannot be mapped onto the backing store
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
