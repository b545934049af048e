//! The scoreboard host.

use chrono::Utc;
use log::{error, info, warn};
use serde::Serialize;

use super::config::ScoreboardConfig;
use crate::clock::{MatchClock, TimeoutCountdown};
use crate::game::{
    Command, MatchEngine, MatchEvent, MatchFormat, MatchResult, MatchState, TeamName,
    engine::LoadState,
};
use crate::history::{HistoryResult, MatchHistory, MatchId, MatchRecord};
use crate::snapshot::{PersistedState, format_from_json};
use crate::storage::{GAME_STATE_KEY, KeyValueStore, MATCH_FORMAT_KEY, StorageResult};

/// Owns the live match and everything around it.
///
/// All mutation goes through `&mut self`, one command at a time.
#[derive(Debug)]
pub struct Scoreboard<S> {
    engine: MatchEngine,
    clock: MatchClock,
    countdown: TimeoutCountdown,
    /// Team whose timeout is counting down.
    timeout_team: Option<TeamName>,
    /// Whether the clock was running when the current timeout began.
    resume_clock: bool,
    store: S,
    config: ScoreboardConfig,
}

impl<S: KeyValueStore> Scoreboard<S> {
    /// Restores the saved match from `store`, or starts a fresh one.
    pub fn open(store: S, config: ScoreboardConfig) -> Self {
        let saved_format = read(&store, MATCH_FORMAT_KEY).and_then(|json| format_from_json(&json));
        let snapshot = read(&store, GAME_STATE_KEY)
            .map(|json| PersistedState::from_json(&json))
            .unwrap_or_default();

        let default_format = MatchFormat::new(config.default_sets_to_win).unwrap_or_default();
        let mut engine = MatchEngine::new(default_format);
        let elapsed_seconds = snapshot.elapsed_seconds.unwrap_or(0);
        if let Err(err) = engine.dispatch(
            LoadState {
                snapshot,
                saved_format,
            }
            .into(),
        ) {
            warn!("could not restore saved match: {err}");
        }
        info!("opened match: {}", engine.state());

        Self {
            engine,
            clock: MatchClock::at(elapsed_seconds),
            countdown: TimeoutCountdown::default(),
            timeout_team: None,
            resume_clock: false,
            store,
            config,
        }
    }

    /// Applies `command`, saves the result and reacts to its events.
    pub fn handle(&mut self, command: Command) -> MatchResult<Vec<MatchEvent>> {
        let events = self.engine.dispatch(command)?;
        for event in &events {
            self.react(event);
        }
        self.save_state();
        Ok(events)
    }

    fn react(&mut self, event: &MatchEvent) {
        match event {
            MatchEvent::MatchCompleted { .. } => {
                self.clock.pause();
                self.countdown.stop();
                self.timeout_team = None;
                self.resume_clock = false;
                self.record_history();
            }
            MatchEvent::MatchReset { .. } => {
                self.clock.reset();
                self.countdown.stop();
                self.timeout_team = None;
                self.resume_clock = false;
                self.save_format();
            }
            MatchEvent::FormatChanged { .. } => self.save_format(),
            MatchEvent::TimeoutTaken { team_name, .. } => {
                if !self.countdown.is_active() {
                    self.resume_clock = self.clock.is_running();
                }
                self.clock.pause();
                self.countdown.start(self.config.timeout_secs);
                self.timeout_team = Some(team_name.clone());
            }
            MatchEvent::SetCompleted { .. } => {}
        }
    }

    /// Advances the clock and any running timeout. Returns the team whose
    /// timeout just ended.
    ///
    /// The seconds left over after a timeout ends count on the match clock
    /// when it resumes.
    pub fn tick(&mut self, seconds: u32) -> Option<TeamName> {
        let remaining = self.countdown.remaining();
        if !self.countdown.tick(seconds) {
            self.clock.tick(u64::from(seconds));
            self.save_state();
            return None;
        }

        self.clock.tick(u64::from(remaining));
        if self.resume_clock {
            self.clock.start();
        }
        self.resume_clock = false;
        self.clock.tick(u64::from(seconds.saturating_sub(remaining)));

        let team = self.timeout_team.take();
        if let Some(team) = &team {
            info!("timeout for {team} is over");
        }
        self.save_state();
        team
    }

    /// Ends a running timeout early.
    pub fn cancel_timeout(&mut self) {
        if self.countdown.is_active() {
            self.countdown.stop();
            self.timeout_team = None;
            if self.resume_clock {
                self.clock.start();
            }
            self.resume_clock = false;
        }
    }

    pub fn toggle_clock(&mut self) {
        self.clock.toggle();
    }

    pub fn reset_clock(&mut self) {
        self.clock.reset();
        self.save_state();
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        self.engine.state()
    }

    #[must_use]
    pub fn clock(&self) -> &MatchClock {
        &self.clock
    }

    #[must_use]
    pub fn countdown(&self) -> &TimeoutCountdown {
        &self.countdown
    }

    #[must_use]
    pub fn timeout_team(&self) -> Option<&TeamName> {
        self.timeout_team.as_ref()
    }

    #[must_use]
    pub fn config(&self) -> &ScoreboardConfig {
        &self.config
    }

    pub fn history(&self) -> HistoryResult<MatchHistory> {
        MatchHistory::load(&self.store)
    }

    pub fn delete_match(&mut self, id: MatchId) -> HistoryResult<MatchRecord> {
        let mut history = MatchHistory::load(&self.store)?;
        let record = history.delete(id)?;
        history.save(&mut self.store)?;
        Ok(record)
    }

    /// Drops every finished match, even if the stored list is unreadable.
    pub fn clear_history(&mut self) -> HistoryResult<()> {
        MatchHistory::clear(&mut self.store)
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn record_history(&mut self) {
        let result = MatchHistory::load(&self.store).and_then(|mut history| {
            history.record_match(self.engine.state(), Utc::now());
            history.save(&mut self.store)
        });
        if let Err(err) = result {
            error!("failed to save match to history: {err}");
        }
    }

    fn save_state(&mut self) {
        let snapshot = PersistedState::capture(self.engine.state(), self.clock.elapsed_seconds());
        if let Err(err) = write_json(&mut self.store, GAME_STATE_KEY, &snapshot) {
            error!("failed to save match: {err}");
        }
    }

    fn save_format(&mut self) {
        let format = MatchFormat {
            sets_to_win: self.engine.state().sets_to_win,
        };
        if let Err(err) = write_json(&mut self.store, MATCH_FORMAT_KEY, &format) {
            error!("failed to save match format: {err}");
        }
    }
}

fn write_json<S: KeyValueStore, T: Serialize>(
    store: &mut S,
    key: &str,
    value: &T,
) -> StorageResult<()> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

fn read<S: KeyValueStore>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(err) => {
            warn!("could not read {key}: {err}");
            None
        }
    }
}
