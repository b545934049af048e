//! History error types.

use thiserror::Error;

use super::models::MatchId;
use crate::storage::StorageError;

/// History errors
#[derive(Debug, Error)]
pub enum HistoryError {
    /// No record with this id
    #[error("Match not found: {0}")]
    NotFound(MatchId),

    /// The stored list could not be decoded
    #[error("Corrupt match history: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// Underlying store failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for history operations
pub type HistoryResult<T> = Result<T, HistoryError>;
