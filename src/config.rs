//! Application configuration loaded from TOML.

use crate::session::{OpponentMode, SessionSettings};
use derive_getters::Getters;
use derive_more::{Display, Error};
use noughts_core::Player;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings read from `noughts.toml`. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Who plays the second mark.
    #[serde(default = "default_opponent")]
    opponent: OpponentMode,

    /// Mark played by the computer in computer mode.
    #[serde(default = "default_computer_mark")]
    computer_mark: Player,

    /// Starting player of the first round.
    #[serde(default = "default_first_player")]
    first_player: Player,

    /// Pause before the computer's move is applied, in milliseconds.
    #[serde(default = "default_thinking_delay_ms")]
    thinking_delay_ms: u64,

    /// Where the terminal UI writes its log.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_opponent() -> OpponentMode {
    OpponentMode::Computer
}

fn default_computer_mark() -> Player {
    Player::O
}

fn default_first_player() -> Player {
    Player::X
}

fn default_thinking_delay_ms() -> u64 {
    600
}

fn default_log_file() -> PathBuf {
    PathBuf::from("noughts.log")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            opponent: default_opponent(),
            computer_mark: default_computer_mark(),
            first_player: default_first_player(),
            thinking_delay_ms: default_thinking_delay_ms(),
            log_file: default_log_file(),
        }
    }
}

impl AppConfig {
    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(opponent = %config.opponent, delay_ms = config.thinking_delay_ms, "Config loaded");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Overrides the opponent mode.
    pub fn with_opponent(mut self, opponent: OpponentMode) -> Self {
        self.opponent = opponent;
        self
    }

    /// Overrides the thinking delay.
    pub fn with_thinking_delay_ms(mut self, delay_ms: u64) -> Self {
        self.thinking_delay_ms = delay_ms;
        self
    }

    /// Session settings derived from this config.
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            opponent: self.opponent,
            computer_mark: self.computer_mark,
            first_player: self.first_player,
        }
    }

    /// Thinking delay as a [`Duration`].
    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = AppConfig::from_toml("opponent = \"human\"\nthinking_delay_ms = 0\n").unwrap();
        assert_eq!(*config.opponent(), OpponentMode::Human);
        assert_eq!(config.thinking_delay(), Duration::ZERO);
        assert_eq!(*config.computer_mark(), Player::O);
    }

    #[test]
    fn test_invalid_toml_reports_message() {
        let err = AppConfig::from_toml("opponent = \"robot\"").unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));
        assert!(err.to_string().contains("Config error"));
    }
}
