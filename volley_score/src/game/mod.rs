//! Volleyball match engine - state, rules and transitions.
//!
//! This module provides:
//! - [`MatchState`]: the snapshot of a match and the invariants it holds
//! - [`Command`]s and the pure reducer [`MatchState::reduce`]
//! - [`MatchEngine`]: single-writer owner of the live state
//! - [`MatchEvent`]s emitted at set and match boundaries

pub mod constants;
pub mod engine;
pub mod entities;
pub mod errors;
pub mod state;

pub use engine::{ApplyCommand, Command, MatchEngine, MatchEvent, Transition};
pub use entities::{MatchFormat, Rotation, RotationError, SetScore, Side, TeamName};
pub use errors::{MatchError, MatchResult};
pub use state::{MatchPhase, MatchState};
