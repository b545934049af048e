//! CLI configuration management.
//!
//! Reads the environment (after `.env` has been loaded) and command-line
//! overrides into one validated configuration.

use std::path::PathBuf;
use std::str::FromStr;

use volley_score::{
    constants::{DEFAULT_SETS_TO_WIN, DEFAULT_TIMEOUT_SECS},
    session::ScoreboardConfig,
};

pub const DEFAULT_DATA_DIR: &str = "volley_data";

/// Complete CLI configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Directory holding the saved match, format and history
    pub data_dir: PathBuf,
    /// Settings handed to the scoreboard
    pub scoreboard: ScoreboardConfig,
}

/// Values given on the command line; each one beats its environment variable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub sets_to_win: Option<u8>,
    pub timeout_secs: Option<u32>,
}

impl CliConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but cannot be parsed, or if the
    /// resulting configuration is invalid
    pub fn from_env(overrides: Overrides) -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok(), overrides)
    }

    /// Like [`CliConfig::from_env`], reading variables through `lookup`.
    pub fn from_vars<F>(lookup: F, overrides: Overrides) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = overrides
            .data_dir
            .or_else(|| lookup("VS_DATA_DIR").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let default_sets_to_win = match overrides.sets_to_win {
            Some(sets) => sets,
            None => parse_var_or(&lookup, "VS_SETS_TO_WIN", DEFAULT_SETS_TO_WIN)?,
        };
        let timeout_secs = match overrides.timeout_secs {
            Some(secs) => secs,
            None => parse_var_or(&lookup, "VS_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
        };

        let config = CliConfig {
            data_dir,
            scoreboard: ScoreboardConfig {
                timeout_secs,
                default_sets_to_win,
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                var: "VS_DATA_DIR".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        self.scoreboard
            .validate()
            .map_err(|reason| ConfigError::Invalid {
                var: "scoreboard".to_string(),
                reason,
            })
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {var}: expected {expected}")]
    Unparsable {
        var: String,
        value: String,
        expected: &'static str,
    },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse a variable with default fallback when it is unset
fn parse_var_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Unparsable {
            var: key.to_string(),
            value,
            expected: std::any::type_name::<T>(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = CliConfig::from_vars(vars(&[]), Overrides::default()).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(config.scoreboard, ScoreboardConfig::default());
    }

    #[test]
    fn test_reads_environment() {
        let config = CliConfig::from_vars(
            vars(&[
                ("VS_DATA_DIR", "/tmp/board"),
                ("VS_SETS_TO_WIN", "2"),
                ("VS_TIMEOUT_SECS", " 45 "),
            ]),
            Overrides::default(),
        )
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/board"));
        assert_eq!(config.scoreboard.default_sets_to_win, 2);
        assert_eq!(config.scoreboard.timeout_secs, 45);
    }

    #[test]
    fn test_overrides_beat_environment() {
        let config = CliConfig::from_vars(
            vars(&[("VS_SETS_TO_WIN", "2"), ("VS_TIMEOUT_SECS", "nonsense")]),
            Overrides {
                data_dir: Some(PathBuf::from("elsewhere")),
                sets_to_win: Some(3),
                timeout_secs: Some(60),
            },
        )
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("elsewhere"));
        assert_eq!(config.scoreboard.default_sets_to_win, 3);
        assert_eq!(config.scoreboard.timeout_secs, 60);
    }

    #[test]
    fn test_unparsable_variable() {
        let err = CliConfig::from_vars(vars(&[("VS_SETS_TO_WIN", "five")]), Overrides::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Unparsable { .. }));
        let msg = err.to_string();
        assert!(msg.contains("VS_SETS_TO_WIN"));
        assert!(msg.contains("five"));
    }

    #[test]
    fn test_invalid_format_rejected() {
        let err = CliConfig::from_vars(vars(&[("VS_SETS_TO_WIN", "4")]), Overrides::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let err = CliConfig::from_vars(
            vars(&[]),
            Overrides {
                timeout_secs: Some(0),
                ..Overrides::default()
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("Timeout"));
    }

    #[test]
    fn test_empty_data_dir_rejected() {
        let err = CliConfig::from_vars(vars(&[("VS_DATA_DIR", "")]), Overrides::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "VS_DATA_DIR"));
    }
}
