//! Rule and default constants.

/// Points needed to win a regular set.
pub const SET_POINTS: u16 = 25;
/// Points needed to win the deciding set.
pub const DECIDING_SET_POINTS: u16 = 15;
/// Minimum lead required to close out any set.
pub const WIN_MARGIN: u16 = 2;

/// Timeouts granted to each team at the start of every set.
pub const TIMEOUTS_PER_SET: u8 = 2;

/// Number of on-court rotation slots.
pub const ROTATION_SIZE: usize = 6;

/// Best of five.
pub const DEFAULT_SETS_TO_WIN: u8 = 3;
/// Formats a match can be played in, by sets needed to win.
pub const VALID_SETS_TO_WIN: [u8; 2] = [2, 3];

pub const MAX_TEAM_NAME_LENGTH: usize = 15;
pub const DEFAULT_TEAM_NAME_A: &str = "TEAM A";
pub const DEFAULT_TEAM_NAME_B: &str = "TEAM B";
pub const DEFAULT_TEAM_COLOR_A: &str = "#007bff";
pub const DEFAULT_TEAM_COLOR_B: &str = "#dc3545";

/// Length of a timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u32 = 30;
