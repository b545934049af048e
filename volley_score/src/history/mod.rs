//! Match history: finished matches, newest first.
//!
//! ## Example
//!
//! ```
//! use chrono::Utc;
//! use volley_score::{MatchFormat, MatchState, history::MatchHistory, storage::MemoryStore};
//!
//! let mut store = MemoryStore::new();
//! let mut state = MatchState::new(MatchFormat::new(2).unwrap());
//! state.sets_b = 2;
//! state.set_history = vec![Default::default(); 2];
//!
//! let mut history = MatchHistory::load(&store)?;
//! let id = history.record_match(&state, Utc::now()).expect("match is over");
//! history.save(&mut store)?;
//! assert_eq!(history.get(id).unwrap().winner_name.as_str(), "TEAM B");
//! # Ok::<(), volley_score::history::HistoryError>(())
//! ```

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{HistoryError, HistoryResult};
pub use manager::MatchHistory;
pub use models::{MatchId, MatchRecord};
