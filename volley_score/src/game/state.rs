//! The authoritative match snapshot and the invariants it upholds.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::constants::{
    DECIDING_SET_POINTS, DEFAULT_TEAM_COLOR_A, DEFAULT_TEAM_COLOR_B,
    DEFAULT_TEAM_NAME_A, DEFAULT_TEAM_NAME_B, SET_POINTS, TIMEOUTS_PER_SET, WIN_MARGIN,
};
use super::entities::{MatchFormat, Rotation, SetScore, Side, TeamName};

/// Where a match stands. Derived from the scores, never stored.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum MatchPhase {
    NotStarted,
    InProgress,
    MatchComplete,
}

impl fmt::Display for MatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::NotStarted => "not started",
            Self::InProgress => "in progress",
            Self::MatchComplete => "complete",
        };
        write!(f, "{repr}")
    }
}

/// Snapshot of an in-progress match.
///
/// Fields are public for reading; every mutation goes through
/// [`MatchState::reduce`](crate::game::engine) so the invariants hold:
/// - `sets_a, sets_b <= sets_to_win`, and at most one side reaches it
/// - `set_history.len() == sets_a + sets_b`
/// - `timeouts_remaining_* <= 2`
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MatchState {
    pub score_a: u16,
    pub score_b: u16,
    pub sets_a: u8,
    pub sets_b: u8,
    pub sets_to_win: u8,
    pub set_history: Vec<SetScore>,
    pub serving_side: Side,
    pub rotation_a: Rotation,
    pub rotation_b: Rotation,
    pub timeouts_remaining_a: u8,
    pub timeouts_remaining_b: u8,
    pub team_name_a: TeamName,
    pub team_name_b: TeamName,
    pub team_color_a: String,
    pub team_color_b: String,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(MatchFormat::default())
    }
}

impl From<MatchFormat> for MatchState {
    fn from(value: MatchFormat) -> Self {
        Self::new(value)
    }
}

impl MatchState {
    /// Fresh match with default names and colours.
    #[must_use]
    pub fn new(format: MatchFormat) -> Self {
        let sets_to_win = format.sets_to_win;
        Self {
            score_a: 0,
            score_b: 0,
            sets_a: 0,
            sets_b: 0,
            sets_to_win,
            set_history: Vec::with_capacity(usize::from(2 * sets_to_win)),
            serving_side: Side::A,
            rotation_a: Rotation::identity(),
            rotation_b: Rotation::identity(),
            timeouts_remaining_a: TIMEOUTS_PER_SET,
            timeouts_remaining_b: TIMEOUTS_PER_SET,
            team_name_a: TeamName::new(DEFAULT_TEAM_NAME_A),
            team_name_b: TeamName::new(DEFAULT_TEAM_NAME_B),
            team_color_a: DEFAULT_TEAM_COLOR_A.to_string(),
            team_color_b: DEFAULT_TEAM_COLOR_B.to_string(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> MatchPhase {
        if self.winner().is_some() {
            MatchPhase::MatchComplete
        } else if self.sets_a == 0 && self.sets_b == 0 && self.score_a == 0 && self.score_b == 0 {
            MatchPhase::NotStarted
        } else {
            MatchPhase::InProgress
        }
    }

    /// Side that has reached `sets_to_win`, if the match is over.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        if self.sets_a >= self.sets_to_win {
            Some(Side::A)
        } else if self.sets_b >= self.sets_to_win {
            Some(Side::B)
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.winner().is_some()
    }

    #[must_use]
    pub fn sets_played(&self) -> u8 {
        self.sets_a + self.sets_b
    }

    /// The current set is the last one the format allows.
    #[must_use]
    pub fn is_deciding_set(&self) -> bool {
        self.sets_played() == (2 * self.sets_to_win).saturating_sub(2)
    }

    #[must_use]
    pub fn points_to_win(&self) -> u16 {
        if self.is_deciding_set() {
            DECIDING_SET_POINTS
        } else {
            SET_POINTS
        }
    }

    /// Side that has closed out the current set on the live scores:
    /// at least `points_to_win` and a lead of two or more. No score cap.
    #[must_use]
    pub fn set_winner(&self) -> Option<Side> {
        let target = self.points_to_win();
        if self.score_a >= target && self.score_a >= self.score_b.saturating_add(WIN_MARGIN) {
            Some(Side::A)
        } else if self.score_b >= target && self.score_b >= self.score_a.saturating_add(WIN_MARGIN) {
            Some(Side::B)
        } else {
            None
        }
    }

    #[must_use]
    pub fn score(&self, side: Side) -> u16 {
        match side {
            Side::A => self.score_a,
            Side::B => self.score_b,
        }
    }

    pub(crate) fn score_mut(&mut self, side: Side) -> &mut u16 {
        match side {
            Side::A => &mut self.score_a,
            Side::B => &mut self.score_b,
        }
    }

    #[must_use]
    pub fn sets(&self, side: Side) -> u8 {
        match side {
            Side::A => self.sets_a,
            Side::B => self.sets_b,
        }
    }

    pub(crate) fn sets_mut(&mut self, side: Side) -> &mut u8 {
        match side {
            Side::A => &mut self.sets_a,
            Side::B => &mut self.sets_b,
        }
    }

    #[must_use]
    pub fn rotation(&self, side: Side) -> &Rotation {
        match side {
            Side::A => &self.rotation_a,
            Side::B => &self.rotation_b,
        }
    }

    pub(crate) fn rotation_mut(&mut self, side: Side) -> &mut Rotation {
        match side {
            Side::A => &mut self.rotation_a,
            Side::B => &mut self.rotation_b,
        }
    }

    /// Player position in the service slot of `side`'s rotation.
    #[must_use]
    pub fn serve_position(&self, side: Side) -> u8 {
        self.rotation(side).server()
    }

    #[must_use]
    pub fn timeouts_remaining(&self, side: Side) -> u8 {
        match side {
            Side::A => self.timeouts_remaining_a,
            Side::B => self.timeouts_remaining_b,
        }
    }

    pub(crate) fn timeouts_remaining_mut(&mut self, side: Side) -> &mut u8 {
        match side {
            Side::A => &mut self.timeouts_remaining_a,
            Side::B => &mut self.timeouts_remaining_b,
        }
    }

    #[must_use]
    pub fn team_name(&self, side: Side) -> &TeamName {
        match side {
            Side::A => &self.team_name_a,
            Side::B => &self.team_name_b,
        }
    }

    pub(crate) fn team_name_mut(&mut self, side: Side) -> &mut TeamName {
        match side {
            Side::A => &mut self.team_name_a,
            Side::B => &mut self.team_name_b,
        }
    }

    #[must_use]
    pub fn team_color(&self, side: Side) -> &str {
        match side {
            Side::A => &self.team_color_a,
            Side::B => &self.team_color_b,
        }
    }

    pub(crate) fn team_color_mut(&mut self, side: Side) -> &mut String {
        match side {
            Side::A => &mut self.team_color_a,
            Side::B => &mut self.team_color_b,
        }
    }

    /// Per-set resets applied at every set boundary.
    pub(crate) fn reset_set_counters(&mut self) {
        self.timeouts_remaining_a = TIMEOUTS_PER_SET;
        self.timeouts_remaining_b = TIMEOUTS_PER_SET;
        self.rotation_a = Rotation::identity();
        self.rotation_b = Rotation::identity();
    }
}

impl fmt::Display for MatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let serve_a = if self.serving_side == Side::A { "*" } else { " " };
        let serve_b = if self.serving_side == Side::B { "*" } else { " " };
        write!(
            f,
            "{serve_a}{} {:02} ({}) - ({}) {:02} {}{serve_b}",
            self.team_name_a, self.score_a, self.sets_a, self.sets_b, self.score_b, self.team_name_b
        )
    }
}
