//! Match transition function.
//!
//! Every command is its own type implementing [`ApplyCommand`]; [`Command`]
//! is the tagged union the host sends in. Applying a command either fully
//! succeeds, yielding the next state and the events it produced, or is
//! rejected with a [`MatchError`] and leaves the state as it was.

use enum_dispatch::enum_dispatch;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::entities::{MatchFormat, Rotation, SetScore, Side, TeamName};
use super::errors::{MatchError, MatchResult};
use super::state::{MatchPhase, MatchState};
use crate::snapshot::PersistedState;

/// Lifecycle notifications for the host to act on.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum MatchEvent {
    SetCompleted {
        winner: Side,
        score: SetScore,
        sets_a: u8,
        sets_b: u8,
    },
    MatchCompleted {
        winner: Side,
        sets_a: u8,
        sets_b: u8,
        set_history: Vec<SetScore>,
    },
    TimeoutTaken {
        side: Side,
        team_name: TeamName,
        remaining: u8,
    },
    /// The format changed before the first point.
    FormatChanged { sets_to_win: u8 },
    /// The match was replaced by a fresh one.
    MatchReset { sets_to_win: u8 },
}

impl fmt::Display for MatchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::SetCompleted {
                winner,
                score,
                sets_a,
                sets_b,
            } => format!("set to side {winner} ({score}), sets {sets_a}-{sets_b}"),
            Self::MatchCompleted {
                winner,
                sets_a,
                sets_b,
                set_history,
            } => {
                let sets = set_history
                    .iter()
                    .map(SetScore::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("match to side {winner}, {sets_a}-{sets_b} ({sets})")
            }
            Self::TimeoutTaken {
                team_name,
                remaining,
                ..
            } => format!("timeout {team_name}, {remaining} left"),
            Self::FormatChanged { sets_to_win } => {
                format!("format set to first to {sets_to_win} sets")
            }
            Self::MatchReset { sets_to_win } => {
                format!("new match, first to {sets_to_win} sets")
            }
        };
        write!(f, "{repr}")
    }
}

/// Result of a successful command.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub state: MatchState,
    pub events: Vec<MatchEvent>,
}

/// A single kind of state change.
///
/// Implementations check everything that can fail before touching `state`.
#[enum_dispatch]
pub trait ApplyCommand {
    fn apply(&self, state: &mut MatchState, events: &mut Vec<MatchEvent>) -> MatchResult<()>;
}

/// Rally won by `side`. Handles side-out rotation and set/match completion.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AddPoint {
    pub side: Side,
}

/// Corrects a mis-scored rally.
///
/// Only the score moves: serve, rotation, sets and timeouts are left alone,
/// even if the point being taken back caused a side-out.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RemovePoint {
    pub side: Side,
}

/// Teams changed ends; every per-side field trades places.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SwapSides;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SetTeamName {
    pub side: Side,
    pub name: String,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SetTeamColor {
    pub side: Side,
    pub color: String,
}

/// Changes the format. Mid-match this resets the match, keeping names;
/// asking the user first is the host's job.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SetMatchFormat {
    pub sets_to_win: u8,
}

/// Starts over. `None` keeps the current format.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ResetMatch {
    pub sets_to_win: Option<u8>,
    pub keep_names: bool,
}

/// Clears the live set (scores, timeouts, rotations) but keeps sets won.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ResetScores;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SetRotation {
    pub side: Side,
    pub rotation: Vec<u8>,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RequestTimeout {
    pub side: Side,
}

/// Replaces the state with a restored snapshot.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct LoadState {
    pub snapshot: PersistedState,
    pub saved_format: Option<MatchFormat>,
}

#[enum_dispatch(ApplyCommand)]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Command {
    AddPoint(AddPoint),
    RemovePoint(RemovePoint),
    SwapSides(SwapSides),
    SetTeamName(SetTeamName),
    SetTeamColor(SetTeamColor),
    SetMatchFormat(SetMatchFormat),
    ResetMatch(ResetMatch),
    ResetScores(ResetScores),
    SetRotation(SetRotation),
    RequestTimeout(RequestTimeout),
    LoadState(LoadState),
}

impl ApplyCommand for AddPoint {
    fn apply(&self, state: &mut MatchState, events: &mut Vec<MatchEvent>) -> MatchResult<()> {
        if state.is_complete() {
            return Err(MatchError::MatchAlreadyComplete);
        }

        let side = self.side;
        let score = state.score_mut(side);
        *score = score.saturating_add(1);

        if side != state.serving_side {
            state.serving_side = side;
            state.rotation_mut(side).rotate();
            debug!(
                "side-out to {side}, position {} serves",
                state.serve_position(side)
            );
        }

        if let Some(winner) = state.set_winner() {
            close_set(state, winner, events);
        }

        Ok(())
    }
}

/// Records the finished set and prepares the next one. The scores of the
/// match-ending set stay on the board.
fn close_set(state: &mut MatchState, winner: Side, events: &mut Vec<MatchEvent>) {
    let score = SetScore::new(state.score_a, state.score_b);
    state.set_history.push(score);
    *state.sets_mut(winner) += 1;
    state.reset_set_counters();

    info!(
        "set {} to side {winner} ({score}), sets {}-{}",
        state.set_history.len(),
        state.sets_a,
        state.sets_b
    );
    events.push(MatchEvent::SetCompleted {
        winner,
        score,
        sets_a: state.sets_a,
        sets_b: state.sets_b,
    });

    if state.is_complete() {
        info!(
            "match to side {winner}, {}-{}",
            state.sets_a, state.sets_b
        );
        events.push(MatchEvent::MatchCompleted {
            winner,
            sets_a: state.sets_a,
            sets_b: state.sets_b,
            set_history: state.set_history.clone(),
        });
    } else {
        state.score_a = 0;
        state.score_b = 0;
    }
}

impl ApplyCommand for RemovePoint {
    fn apply(&self, state: &mut MatchState, _events: &mut Vec<MatchEvent>) -> MatchResult<()> {
        if state.is_complete() {
            return Err(MatchError::MatchAlreadyComplete);
        }
        let score = state.score_mut(self.side);
        *score = score.saturating_sub(1);
        Ok(())
    }
}

impl ApplyCommand for SwapSides {
    fn apply(&self, state: &mut MatchState, _events: &mut Vec<MatchEvent>) -> MatchResult<()> {
        std::mem::swap(&mut state.score_a, &mut state.score_b);
        std::mem::swap(&mut state.sets_a, &mut state.sets_b);
        std::mem::swap(&mut state.team_name_a, &mut state.team_name_b);
        std::mem::swap(&mut state.team_color_a, &mut state.team_color_b);
        std::mem::swap(
            &mut state.timeouts_remaining_a,
            &mut state.timeouts_remaining_b,
        );
        std::mem::swap(&mut state.rotation_a, &mut state.rotation_b);
        state.serving_side = state.serving_side.other();
        for set in &mut state.set_history {
            *set = set.swapped();
        }
        Ok(())
    }
}

impl ApplyCommand for SetTeamName {
    fn apply(&self, state: &mut MatchState, _events: &mut Vec<MatchEvent>) -> MatchResult<()> {
        *state.team_name_mut(self.side) = TeamName::new(&self.name);
        Ok(())
    }
}

impl ApplyCommand for SetTeamColor {
    fn apply(&self, state: &mut MatchState, _events: &mut Vec<MatchEvent>) -> MatchResult<()> {
        state.team_color_mut(self.side).clone_from(&self.color);
        Ok(())
    }
}

impl ApplyCommand for SetMatchFormat {
    fn apply(&self, state: &mut MatchState, events: &mut Vec<MatchEvent>) -> MatchResult<()> {
        let format = MatchFormat::new(self.sets_to_win)?;
        if state.phase() == MatchPhase::NotStarted {
            state.sets_to_win = format.sets_to_win;
            events.push(MatchEvent::FormatChanged {
                sets_to_win: format.sets_to_win,
            });
            return Ok(());
        }

        ResetMatch {
            sets_to_win: Some(format.sets_to_win),
            keep_names: true,
        }
        .apply(state, events)
    }
}

impl ApplyCommand for ResetMatch {
    fn apply(&self, state: &mut MatchState, events: &mut Vec<MatchEvent>) -> MatchResult<()> {
        let format = MatchFormat::new(self.sets_to_win.unwrap_or(state.sets_to_win))?;
        let mut fresh = MatchState::from(format);
        if self.keep_names {
            fresh.team_name_a = state.team_name_a.clone();
            fresh.team_name_b = state.team_name_b.clone();
        }
        *state = fresh;

        info!("match reset, {format}");
        events.push(MatchEvent::MatchReset {
            sets_to_win: format.sets_to_win,
        });
        Ok(())
    }
}

impl ApplyCommand for ResetScores {
    fn apply(&self, state: &mut MatchState, _events: &mut Vec<MatchEvent>) -> MatchResult<()> {
        state.score_a = 0;
        state.score_b = 0;
        state.reset_set_counters();
        Ok(())
    }
}

impl ApplyCommand for SetRotation {
    fn apply(&self, state: &mut MatchState, _events: &mut Vec<MatchEvent>) -> MatchResult<()> {
        let rotation = Rotation::try_from(self.rotation.as_slice()).map_err(|err| {
            MatchError::InvalidRotation {
                side: self.side,
                rotation: err.0,
            }
        })?;
        *state.rotation_mut(self.side) = rotation;
        Ok(())
    }
}

impl ApplyCommand for RequestTimeout {
    fn apply(&self, state: &mut MatchState, events: &mut Vec<MatchEvent>) -> MatchResult<()> {
        if state.is_complete() {
            return Err(MatchError::MatchAlreadyComplete);
        }
        let side = self.side;
        let remaining = state.timeouts_remaining_mut(side);
        if *remaining == 0 {
            return Err(MatchError::NoTimeoutsAvailable { side });
        }
        *remaining -= 1;
        let remaining = *remaining;

        events.push(MatchEvent::TimeoutTaken {
            side,
            team_name: state.team_name(side).clone(),
            remaining,
        });
        Ok(())
    }
}

impl ApplyCommand for LoadState {
    fn apply(&self, state: &mut MatchState, _events: &mut Vec<MatchEvent>) -> MatchResult<()> {
        let current = MatchFormat::new(state.sets_to_win).unwrap_or_default();
        let format = match self.saved_format {
            Some(saved) => MatchFormat::new(saved.sets_to_win).unwrap_or_else(|err| {
                warn!("ignoring saved format: {err}");
                current
            }),
            None => current,
        };
        *state = MatchState::restore(&self.snapshot, format);
        Ok(())
    }
}

impl Command {
    #[must_use]
    pub fn add_point(side: Side) -> Self {
        AddPoint { side }.into()
    }

    #[must_use]
    pub fn remove_point(side: Side) -> Self {
        RemovePoint { side }.into()
    }

    #[must_use]
    pub fn request_timeout(side: Side) -> Self {
        RequestTimeout { side }.into()
    }
}

impl MatchState {
    /// Pure transition: the next state and the events it produced.
    /// `self` is untouched either way.
    pub fn reduce(&self, command: &Command) -> MatchResult<Transition> {
        let mut state = self.clone();
        let mut events = Vec::new();
        command.apply(&mut state, &mut events)?;
        debug!("applied {command:?}: {state}");
        Ok(Transition { state, events })
    }
}

/// Single owner of the live match state.
///
/// Commands are applied one at a time through `&mut self`, so there is no
/// way to interleave two transitions on the same match.
#[derive(Debug, Default)]
pub struct MatchEngine {
    state: MatchState,
}

impl From<MatchState> for MatchEngine {
    fn from(state: MatchState) -> Self {
        Self { state }
    }
}

impl MatchEngine {
    #[must_use]
    pub fn new(format: MatchFormat) -> Self {
        Self {
            state: MatchState::from(format),
        }
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Applies `command`; on error the state is unchanged.
    pub fn dispatch(&mut self, command: Command) -> MatchResult<Vec<MatchEvent>> {
        let Transition { state, events } = self.state.reduce(&command)?;
        self.state = state;
        Ok(events)
    }
}
