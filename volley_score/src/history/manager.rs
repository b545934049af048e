//! Newest-first list of finished matches, kept under one store key.

use chrono::{DateTime, Utc};
use log::info;

use super::errors::{HistoryError, HistoryResult};
use super::models::{MatchId, MatchRecord};
use crate::game::state::MatchState;
use crate::storage::{KeyValueStore, MATCH_HISTORY_KEY};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchHistory {
    records: Vec<MatchRecord>,
}

impl MatchHistory {
    /// Reads the stored list; a store without one yields an empty history.
    pub fn load<S: KeyValueStore>(store: &S) -> HistoryResult<Self> {
        let records = match store.get(MATCH_HISTORY_KEY)? {
            Some(json) => serde_json::from_str(&json)?,
            None => Vec::new(),
        };
        Ok(Self { records })
    }

    pub fn save<S: KeyValueStore>(&self, store: &mut S) -> HistoryResult<()> {
        let json = serde_json::to_string(&self.records)?;
        store.set(MATCH_HISTORY_KEY, &json)?;
        Ok(())
    }

    /// Adds `record` at the front, giving it an id no other record uses.
    pub fn record(&mut self, mut record: MatchRecord) -> MatchId {
        if self.get(record.id).is_some() {
            let max = self.records.iter().map(|r| r.id.0).max().unwrap_or(record.id.0);
            record.id = MatchId(max + 1);
        }
        let id = record.id;
        self.records.insert(0, record);
        id
    }

    /// Records the outcome of a completed match. `None` if it isn't over.
    pub fn record_match(
        &mut self,
        state: &MatchState,
        completed_at: DateTime<Utc>,
    ) -> Option<MatchId> {
        let record = MatchRecord::from_state(state, completed_at)?;
        let id = self.record(record);
        info!("recorded match {id}");
        Some(id)
    }

    pub fn delete(&mut self, id: MatchId) -> HistoryResult<MatchRecord> {
        let idx = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(HistoryError::NotFound(id))?;
        Ok(self.records.remove(idx))
    }

    /// Drops the stored list, readable or not.
    pub fn clear<S: KeyValueStore>(store: &mut S) -> HistoryResult<()> {
        store.remove(MATCH_HISTORY_KEY)?;
        info!("match history cleared");
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: MatchId) -> Option<&MatchRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &MatchRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
