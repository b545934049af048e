use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

use super::constants::{
    DEFAULT_SETS_TO_WIN, MAX_TEAM_NAME_LENGTH, ROTATION_SIZE, VALID_SETS_TO_WIN,
};
use super::errors::MatchError;

/// One of the two logical sides of the scoreboard.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Side {
    #[default]
    A,
    B,
}

impl Side {
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::A => "A",
            Self::B => "B",
        };
        write!(f, "{repr}")
    }
}

/// Final score of a completed set.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetScore {
    pub points_a: u16,
    pub points_b: u16,
}

impl SetScore {
    #[must_use]
    pub const fn new(points_a: u16, points_b: u16) -> Self {
        Self { points_a, points_b }
    }

    /// Side with more points, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        match self.points_a.cmp(&self.points_b) {
            std::cmp::Ordering::Greater => Some(Side::A),
            std::cmp::Ordering::Less => Some(Side::B),
            std::cmp::Ordering::Equal => None,
        }
    }

    #[must_use]
    pub const fn swapped(self) -> Self {
        Self {
            points_a: self.points_b,
            points_b: self.points_a,
        }
    }
}

impl fmt::Display for SetScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.points_a, self.points_b)
    }
}

#[derive(Debug, Error, Eq, PartialEq)]
#[error("rotation must be a permutation of 1..=6, got {0:?}")]
pub struct RotationError(pub Vec<u8>);

/// On-court rotation order. Slot 0 holds the player about to serve.
///
/// Always a permutation of `1..=6`; the only way to build one from outside
/// input is through [`Rotation::try_from`].
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Rotation([u8; ROTATION_SIZE]);

impl Rotation {
    #[must_use]
    pub const fn identity() -> Self {
        Self([1, 2, 3, 4, 5, 6])
    }

    /// Player position currently in the service slot.
    #[must_use]
    pub const fn server(&self) -> u8 {
        self.0[0]
    }

    #[must_use]
    pub const fn positions(&self) -> &[u8; ROTATION_SIZE] {
        &self.0
    }

    /// Moves the last slot to the front. Applied on every side-out.
    pub fn rotate(&mut self) {
        self.0.rotate_right(1);
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

impl TryFrom<&[u8]> for Rotation {
    type Error = RotationError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        if value.len() != ROTATION_SIZE {
            return Err(RotationError(value.to_vec()));
        }
        let mut seen = [false; ROTATION_SIZE];
        let mut slots = [0u8; ROTATION_SIZE];
        for (slot, &position) in slots.iter_mut().zip(value) {
            let idx = usize::from(position).wrapping_sub(1);
            match seen.get_mut(idx) {
                Some(flag) if !*flag => *flag = true,
                _ => return Err(RotationError(value.to_vec())),
            }
            *slot = position;
        }
        Ok(Self(slots))
    }
}

impl TryFrom<Vec<u8>> for Rotation {
    type Error = RotationError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(value.as_slice())
    }
}

impl From<Rotation> for Vec<u8> {
    fn from(value: Rotation) -> Self {
        value.0.to_vec()
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = self
            .0
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "[{repr}]")
    }
}

/// Display name of a team, capped at [`MAX_TEAM_NAME_LENGTH`] characters.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct TeamName(String);

impl TeamName {
    #[must_use]
    pub fn new(s: &str) -> Self {
        Self(s.chars().take(MAX_TEAM_NAME_LENGTH).collect())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for TeamName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

impl From<String> for TeamName {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<&str> for TeamName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The separately persisted match-format record.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchFormat {
    pub sets_to_win: u8,
}

impl MatchFormat {
    /// Builds a format, rejecting anything but best-of-3 or best-of-5.
    pub fn new(sets_to_win: u8) -> Result<Self, MatchError> {
        if VALID_SETS_TO_WIN.contains(&sets_to_win) {
            Ok(Self { sets_to_win })
        } else {
            Err(MatchError::InvalidFormat(sets_to_win))
        }
    }

    #[must_use]
    pub const fn best_of(&self) -> u8 {
        2 * self.sets_to_win - 1
    }
}

impl Default for MatchFormat {
    fn default() -> Self {
        Self {
            sets_to_win: DEFAULT_SETS_TO_WIN,
        }
    }
}

impl fmt::Display for MatchFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "best of {}", self.best_of())
    }
}
