//! Application configuration.

use std::path::Path;
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::games::tictactoe::Player;

/// Runtime configuration, read from an optional TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Milliseconds the opponent waits before replying.
    #[serde(default = "default_opponent_delay_ms")]
    opponent_delay_ms: u64,

    /// SQLite file holding the persisted score.
    #[serde(default = "default_database_path")]
    database_path: String,

    /// Log file written while the terminal UI runs.
    #[serde(default = "default_log_file")]
    log_file: String,

    /// Start with the computer opponent enabled.
    #[serde(default)]
    opponent_mode: bool,

    /// Human symbol when starting in opponent mode.
    #[serde(default = "default_human_symbol")]
    human_symbol: Player,
}

fn default_opponent_delay_ms() -> u64 {
    250
}

fn default_database_path() -> String {
    "tictactoe_duel.db".to_string()
}

fn default_log_file() -> String {
    "tictactoe_duel.log".to_string()
}

fn default_human_symbol() -> Player {
    Player::X
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            opponent_delay_ms: default_opponent_delay_ms(),
            database_path: default_database_path(),
            log_file: default_log_file(),
            opponent_mode: false,
            human_symbol: default_human_symbol(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid configuration.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        info!(?config, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but is invalid.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Opponent reply delay.
    pub fn opponent_delay(&self) -> Duration {
        Duration::from_millis(self.opponent_delay_ms)
    }

    /// Overrides the database path.
    pub fn with_database_path(mut self, path: impl Into<String>) -> Self {
        self.database_path = path.into();
        self
    }

    /// Overrides the opponent delay.
    pub fn with_opponent_delay_ms(mut self, ms: u64) -> Self {
        self.opponent_delay_ms = ms;
        self
    }

    /// Starts in opponent mode with the human playing `human`.
    pub fn with_opponent(mut self, human: Player) -> Self {
        self.opponent_mode = true;
        self.human_symbol = human;
        self
    }
}

/// Configuration error with location tracking.
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
    /// Creates a new config error with caller location tracking.
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
    fn test_empty_toml_gives_defaults() {
        assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = AppConfig::from_toml(
            r#"
            opponent_delay_ms = 50
            opponent_mode = true
            human_symbol = "O"
            "#,
        )
        .unwrap();
        assert_eq!(*config.opponent_delay_ms(), 50);
        assert!(*config.opponent_mode());
        assert_eq!(*config.human_symbol(), Player::O);
        assert_eq!(config.database_path(), "tictactoe_duel.db");
    }

    #[test]
    fn test_bad_toml_is_error() {
        let err = AppConfig::from_toml("opponent_delay_ms = \"soon\"").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = AppConfig::load_or_default("/definitely/not/here.toml").unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
