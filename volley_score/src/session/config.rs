//! Scoreboard configuration.

use serde::{Deserialize, Serialize};

use crate::game::constants::{DEFAULT_SETS_TO_WIN, DEFAULT_TIMEOUT_SECS, VALID_SETS_TO_WIN};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreboardConfig {
    /// Length of a timeout countdown
    pub timeout_secs: u32,

    /// Format used when nothing has been saved yet
    pub default_sets_to_win: u8,
}

impl Default for ScoreboardConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_sets_to_win: DEFAULT_SETS_TO_WIN,
        }
    }
}

impl ScoreboardConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err("Timeout must be between 1 and 300 seconds".to_string());
        }

        if !VALID_SETS_TO_WIN.contains(&self.default_sets_to_win) {
            return Err("Sets to win must be 2 or 3".to_string());
        }

        Ok(())
    }
}
