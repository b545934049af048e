//! Engine error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entities::Side;

/// Rejections of a command. None of these are fatal: the state is left
/// exactly as it was before the command.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum MatchError {
    #[error("invalid rotation for side {side}: {rotation:?} is not a permutation of 1..=6")]
    InvalidRotation { side: Side, rotation: Vec<u8> },
    #[error("no timeouts left for side {side} in this set")]
    NoTimeoutsAvailable { side: Side },
    #[error("a match is won with 2 or 3 sets, not {0}")]
    InvalidFormat(u8),
    #[error("match is over, reset to keep scoring")]
    MatchAlreadyComplete,
}

/// Result type for engine operations
pub type MatchResult<T> = Result<T, MatchError>;
