//! Snapshot error types.

use thiserror::Error;

/// Problems found while reading a persisted record. Loading never fails
/// because of these; they are logged and the affected fields fall back to
/// their defaults.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Not valid JSON at all
    #[error("Malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Valid JSON, but not an object
    #[error("Snapshot is not an object")]
    NotAnObject,

    /// A single field with the wrong type or an out-of-range value
    #[error("Invalid snapshot field {field}: {reason}")]
    InvalidField { field: String, reason: String },
}

/// Result type for snapshot operations
pub type SnapshotResult<T> = Result<T, SnapshotError>;
