//! # Volley Score
//!
//! A volleyball scoreboard built around a pure match-state engine.
//!
//! The engine is a reducer: a [`MatchState`] plus a [`Command`] gives the
//! next state and the [`MatchEvent`]s it produced, or a [`MatchError`]
//! and no change at all. It knows the rules and nothing else:
//!
//! - rally scoring to 25 (15 in the deciding set), win by two, no cap
//! - side-out rotation: the side winning back serve rotates one slot
//! - best-of-3 or best-of-5 formats, set and match completion
//! - two timeouts per team per set
//!
//! Everything with side effects lives around it: [`snapshot`] reads and
//! writes the persisted record, [`storage`] holds the strings, [`history`]
//! keeps finished matches, [`clock`] models the match clock and timeout
//! countdown, and [`session`] wires them together behind one dispatch path.
//!
//! ## Example
//!
//! ```
//! use volley_score::{Command, MatchEngine, MatchEvent, MatchFormat, Side};
//!
//! let mut engine = MatchEngine::new(MatchFormat::new(2)?);
//! for _ in 0..25 {
//!     engine.dispatch(Command::add_point(Side::B))?;
//! }
//! assert_eq!(engine.state().sets_b, 1);
//! assert_eq!(engine.state().rotation_b.positions(), &[1, 2, 3, 4, 5, 6]);
//! # Ok::<(), volley_score::MatchError>(())
//! ```

/// Match clock and timeout countdown.
pub mod clock;

/// Core rules, state and transitions.
pub mod game;
pub use game::{
    Command, MatchEngine, MatchError, MatchEvent, MatchFormat, MatchPhase, MatchResult,
    MatchState, Rotation, SetScore, Side, TeamName, Transition,
    constants::{self, DECIDING_SET_POINTS, SET_POINTS, TIMEOUTS_PER_SET},
};

pub mod history;
pub mod session;
pub mod snapshot;
pub mod storage;
