//! Key-value persistence for match records.
//!
//! The scoreboard keeps three records, each stored as a JSON string under
//! its own key: the live match ([`GAME_STATE_KEY`]), the chosen format
//! ([`MATCH_FORMAT_KEY`]) and the list of finished matches
//! ([`MATCH_HISTORY_KEY`]).
//!
//! [`KeyValueStore`] abstracts over where the strings live, so the host can
//! run against a directory on disk ([`FileStore`]) or purely in memory
//! ([`MemoryStore`]) in tests.

pub mod errors;
pub mod file;
pub mod memory;

pub use errors::{StorageError, StorageResult};
pub use file::FileStore;
pub use memory::MemoryStore;

pub const GAME_STATE_KEY: &str = "gameState";
pub const MATCH_FORMAT_KEY: &str = "matchFormat";
pub const MATCH_HISTORY_KEY: &str = "matchHistory";

/// String-keyed storage of serialized records.
pub trait KeyValueStore {
    /// Stored value for `key`, or `None` if it was never written.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}
