//! Match history data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::{
    entities::{SetScore, Side, TeamName},
    state::MatchState,
};

/// History entry id: completion time in Unix milliseconds, bumped when
/// two matches finish within the same millisecond.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct MatchId(pub i64);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A finished match
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: MatchId,
    pub team_name_a: TeamName,
    pub team_name_b: TeamName,
    pub sets_a: u8,
    pub sets_b: u8,
    pub set_scores: Vec<SetScore>,
    pub winner_name: TeamName,
    pub completed_at: DateTime<Utc>,
}

impl MatchRecord {
    /// Record for a completed match, `None` if `state` has no winner yet.
    #[must_use]
    pub fn from_state(state: &MatchState, completed_at: DateTime<Utc>) -> Option<Self> {
        let winner = state.winner()?;
        Some(Self {
            id: MatchId(completed_at.timestamp_millis()),
            team_name_a: state.team_name_a.clone(),
            team_name_b: state.team_name_b.clone(),
            sets_a: state.sets_a,
            sets_b: state.sets_b,
            set_scores: state.set_history.clone(),
            winner_name: state.team_name(winner).clone(),
            completed_at,
        })
    }

    /// Side whose name matches the winner, if the names differ.
    #[must_use]
    pub fn winner_side(&self) -> Option<Side> {
        if self.team_name_a == self.team_name_b {
            None
        } else if self.winner_name == self.team_name_a {
            Some(Side::A)
        } else if self.winner_name == self.team_name_b {
            Some(Side::B)
        } else {
            None
        }
    }
}

impl fmt::Display for MatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sets = self
            .set_scores
            .iter()
            .map(SetScore::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "#{} {} {} {}-{} {} ({sets}), winner {}",
            self.id,
            self.completed_at.format("%Y-%m-%d %H:%M"),
            self.team_name_a,
            self.sets_a,
            self.sets_b,
            self.team_name_b,
            self.winner_name
        )
    }
}
