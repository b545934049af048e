//! Persisted match records.
//!
//! The host stores a [`PersistedState`] after every command and a
//! [`MatchFormat`](crate::game::entities::MatchFormat) record whenever the
//! format changes. Reading them back is lenient: a damaged field only costs
//! that field, which falls back to its initial value.
//!
//! ## Example
//!
//! ```
//! use volley_score::{MatchFormat, MatchState, snapshot::PersistedState};
//!
//! let saved = PersistedState::from_json(r#"{"scoreA": 4, "rotationA": "oops"}"#);
//! let state = MatchState::restore(&saved, MatchFormat::default());
//! assert_eq!(state.score_a, 4);
//! assert_eq!(state.rotation_a.positions(), &[1, 2, 3, 4, 5, 6]);
//! ```

pub mod errors;
pub mod models;
mod restore;

pub use errors::{SnapshotError, SnapshotResult};
pub use models::{PersistedState, format_from_json};
