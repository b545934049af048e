//! Persisted snapshot record and its lenient decoder.

use log::warn;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use super::errors::{SnapshotError, SnapshotResult};
use crate::game::{
    entities::{MatchFormat, Rotation, SetScore, Side, TeamName},
    state::MatchState,
};

/// The persisted match record. Every field is optional: records written
/// by older builds, or damaged ones, are merged over defaults on load.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_a: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_b: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets_a: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets_b: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_name_a: Option<TeamName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_name_b: Option<TeamName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_history: Option<Vec<SetScore>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving_side: Option<Side>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeouts_remaining_a: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeouts_remaining_b: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_a: Option<Rotation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_b: Option<Rotation>,
    /// Written for readers of the record; derived from the rotation on load.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serve_position_a: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serve_position_b: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_color_a: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_color_b: Option<String>,
}

impl PersistedState {
    /// Full record of `state` plus the host's clock reading.
    #[must_use]
    pub fn capture(state: &MatchState, elapsed_seconds: u64) -> Self {
        Self {
            score_a: Some(state.score_a),
            score_b: Some(state.score_b),
            sets_a: Some(state.sets_a),
            sets_b: Some(state.sets_b),
            team_name_a: Some(state.team_name_a.clone()),
            team_name_b: Some(state.team_name_b.clone()),
            elapsed_seconds: Some(elapsed_seconds),
            set_history: Some(state.set_history.clone()),
            serving_side: Some(state.serving_side),
            timeouts_remaining_a: Some(state.timeouts_remaining_a),
            timeouts_remaining_b: Some(state.timeouts_remaining_b),
            rotation_a: Some(state.rotation_a),
            rotation_b: Some(state.rotation_b),
            serve_position_a: Some(state.serve_position(Side::A)),
            serve_position_b: Some(state.serve_position(Side::B)),
            team_color_a: Some(state.team_color_a.clone()),
            team_color_b: Some(state.team_color_b.clone()),
        }
    }

    /// Decodes a record field by field. Fails only when the input is not a
    /// JSON object; a field of the wrong shape is logged and left empty.
    pub fn parse(json: &str) -> SnapshotResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        match value {
            Value::Object(obj) => Ok(Self::from_object(&obj)),
            _ => Err(SnapshotError::NotAnObject),
        }
    }

    /// Like [`PersistedState::parse`], but a record that cannot be read at
    /// all yields an empty one.
    #[must_use]
    pub fn from_json(json: &str) -> Self {
        Self::parse(json).unwrap_or_else(|err| {
            warn!("discarding saved match: {err}");
            Self::default()
        })
    }

    fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            score_a: field(obj, "scoreA"),
            score_b: field(obj, "scoreB"),
            sets_a: field(obj, "setsA"),
            sets_b: field(obj, "setsB"),
            team_name_a: field(obj, "teamNameA"),
            team_name_b: field(obj, "teamNameB"),
            elapsed_seconds: field(obj, "elapsedSeconds"),
            set_history: field(obj, "setHistory"),
            serving_side: side_field(obj, "servingSide"),
            timeouts_remaining_a: field(obj, "timeoutsRemainingA"),
            timeouts_remaining_b: field(obj, "timeoutsRemainingB"),
            rotation_a: field(obj, "rotationA"),
            rotation_b: field(obj, "rotationB"),
            serve_position_a: field(obj, "servePositionA"),
            serve_position_b: field(obj, "servePositionB"),
            team_color_a: field(obj, "teamColorA"),
            team_color_b: field(obj, "teamColorB"),
        }
    }

    pub fn to_json(&self) -> SnapshotResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Reads the separately stored format record, if it holds a valid format.
#[must_use]
pub fn format_from_json(json: &str) -> Option<MatchFormat> {
    let value: Value = match serde_json::from_str(json) {
        Ok(value) => value,
        Err(err) => {
            warn!("discarding saved match format: {}", SnapshotError::from(err));
            return None;
        }
    };
    let sets_to_win = value.as_object().and_then(|obj| field::<u8>(obj, "setsToWin"))?;
    match MatchFormat::new(sets_to_win) {
        Ok(format) => Some(format),
        Err(err) => {
            warn!("discarding saved match format: {err}");
            None
        }
    }
}

fn field<T: DeserializeOwned>(obj: &Map<String, Value>, key: &str) -> Option<T> {
    let value = obj.get(key)?;
    if value.is_null() {
        return None;
    }
    match T::deserialize(value) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            let err = SnapshotError::InvalidField {
                field: key.to_string(),
                reason: err.to_string(),
            };
            warn!("{err}");
            None
        }
    }
}

// Older records number the sides 1 and 2.
fn side_field(obj: &Map<String, Value>, key: &str) -> Option<Side> {
    match obj.get(key)?.as_u64() {
        Some(1) => Some(Side::A),
        Some(2) => Some(Side::B),
        _ => field(obj, key),
    }
}
