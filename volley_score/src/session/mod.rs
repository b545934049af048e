//! Host session tying the engine to storage, history and the clocks.
//!
//! The engine itself never does I/O. [`Scoreboard`] is the single dispatch
//! path a front end talks to: it applies a command, then saves the result
//! and reacts to the events. Saving happens after the transition and its
//! failures are only logged, so a broken disk never undoes a point.
//!
//! ## Example
//!
//! ```
//! use volley_score::{Command, Side, session::{Scoreboard, ScoreboardConfig}, storage::MemoryStore};
//!
//! let mut board = Scoreboard::open(MemoryStore::new(), ScoreboardConfig::default());
//! board.handle(Command::add_point(Side::B)).unwrap();
//! assert_eq!(board.state().score_b, 1);
//!
//! // Reopening the same store picks up where we left off.
//! let board = Scoreboard::open(board.into_store(), ScoreboardConfig::default());
//! assert_eq!(board.state().score_b, 1);
//! ```

pub mod config;
pub mod scoreboard;

pub use config::ScoreboardConfig;
pub use scoreboard::Scoreboard;
