//! Match clock and timeout countdown.
//!
//! Both are driven by explicit `tick(seconds)` calls from the host rather
//! than by a timer of their own, so they stay deterministic and testable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Running time of a match, in whole seconds.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct MatchClock {
    elapsed_seconds: u64,
    running: bool,
}

impl MatchClock {
    /// Paused clock showing `elapsed_seconds`.
    #[must_use]
    pub const fn at(elapsed_seconds: u64) -> Self {
        Self {
            elapsed_seconds,
            running: false,
        }
    }

    #[must_use]
    pub const fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Back to 00:00, paused.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn tick(&mut self, seconds: u64) {
        if self.running {
            self.elapsed_seconds = self.elapsed_seconds.saturating_add(seconds);
        }
    }
}

impl fmt::Display for MatchClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.elapsed_seconds / 60;
        let seconds = self.elapsed_seconds % 60;
        write!(f, "{minutes:02}:{seconds:02}")
    }
}

/// Countdown shown while a team's timeout runs.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TimeoutCountdown {
    remaining: u32,
    active: bool,
}

impl TimeoutCountdown {
    pub fn start(&mut self, seconds: u32) {
        self.remaining = seconds;
        self.active = true;
    }

    pub fn stop(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Advances the countdown. Returns `true` exactly once, on the tick
    /// that brings it to zero.
    pub fn tick(&mut self, seconds: u32) -> bool {
        if !self.active {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(seconds);
        if self.remaining == 0 {
            self.active = false;
            return true;
        }
        false
    }
}
