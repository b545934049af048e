//! Merging a persisted record back into a valid [`MatchState`].

use log::warn;

use super::models::PersistedState;
use crate::game::{
    constants::TIMEOUTS_PER_SET,
    entities::{MatchFormat, SetScore, Side},
    state::MatchState,
};

impl MatchState {
    /// Builds a state from `snapshot` over a fresh match in `format`.
    /// Absent fields keep their initial values; present ones that
    /// would break an invariant are replaced by their initial values too.
    #[must_use]
    pub fn restore(snapshot: &PersistedState, format: MatchFormat) -> Self {
        let sets_to_win = format.sets_to_win;
        let mut state = Self::new(format);

        if let Some(score) = snapshot.score_a {
            state.score_a = score;
        }
        if let Some(score) = snapshot.score_b {
            state.score_b = score;
        }
        if let Some(side) = snapshot.serving_side {
            state.serving_side = side;
        }
        if let Some(rotation) = snapshot.rotation_a {
            state.rotation_a = rotation;
        }
        if let Some(rotation) = snapshot.rotation_b {
            state.rotation_b = rotation;
        }
        if let Some(name) = &snapshot.team_name_a {
            state.team_name_a = name.clone();
        }
        if let Some(name) = &snapshot.team_name_b {
            state.team_name_b = name.clone();
        }
        if let Some(color) = &snapshot.team_color_a {
            state.team_color_a = color.clone();
        }
        if let Some(color) = &snapshot.team_color_b {
            state.team_color_b = color.clone();
        }
        state.timeouts_remaining_a =
            timeouts_or_default("timeoutsRemainingA", snapshot.timeouts_remaining_a);
        state.timeouts_remaining_b =
            timeouts_or_default("timeoutsRemainingB", snapshot.timeouts_remaining_b);

        let sets_a = snapshot.sets_a.unwrap_or(0);
        let sets_b = snapshot.sets_b.unwrap_or(0);
        let history = snapshot.set_history.clone().unwrap_or_default();
        let (sets_a, sets_b, history) = reconcile_sets(sets_a, sets_b, history, sets_to_win);
        state.sets_a = sets_a;
        state.sets_b = sets_b;
        state.set_history = history;

        state
    }
}

fn timeouts_or_default(field: &str, value: Option<u8>) -> u8 {
    match value {
        Some(timeouts) if timeouts <= TIMEOUTS_PER_SET => timeouts,
        Some(timeouts) => {
            warn!("saved {field} of {timeouts} exceeds {TIMEOUTS_PER_SET}, using default");
            TIMEOUTS_PER_SET
        }
        None => TIMEOUTS_PER_SET,
    }
}

fn sets_are_valid(sets_a: u8, sets_b: u8, sets_to_win: u8) -> bool {
    sets_a <= sets_to_win && sets_b <= sets_to_win && !(sets_a == sets_to_win && sets_b == sets_to_win)
}

/// Set counters and history must agree. When they don't, the history wins
/// if every entry names a winner; otherwise both start over.
fn reconcile_sets(
    sets_a: u8,
    sets_b: u8,
    history: Vec<SetScore>,
    sets_to_win: u8,
) -> (u8, u8, Vec<SetScore>) {
    let played = usize::from(sets_a) + usize::from(sets_b);
    if history.len() == played && sets_are_valid(sets_a, sets_b, sets_to_win) {
        return (sets_a, sets_b, history);
    }

    let mut derived_a = 0usize;
    let mut derived_b = 0usize;
    for set in &history {
        match set.winner() {
            Some(Side::A) => derived_a += 1,
            Some(Side::B) => derived_b += 1,
            None => {
                warn!("saved set history has a drawn set ({set}), clearing sets");
                return (0, 0, Vec::new());
            }
        }
    }

    match (u8::try_from(derived_a), u8::try_from(derived_b)) {
        (Ok(a), Ok(b)) if sets_are_valid(a, b, sets_to_win) => {
            warn!("saved sets {sets_a}-{sets_b} disagree with set history, using {a}-{b}");
            (a, b, history)
        }
        _ => {
            warn!("saved sets {sets_a}-{sets_b} do not fit a match to {sets_to_win}, clearing sets");
            (0, 0, Vec::new())
        }
    }
}
