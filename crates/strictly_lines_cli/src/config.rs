//! Application configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use strictly_lines::GameConfig;
use tracing::{debug, info, instrument};

/// Top-level configuration for the terminal front end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Game and engine settings.
    game: GameConfig,

    /// Engine thinking delay.
    thinking: ThinkingDelay,
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.thinking.validate()?;
        info!(
            board_size = config.game.board_size(),
            line_length = config.game.line_length(),
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }
}

/// Bounds of the pause before the engine commits a move, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct ThinkingDelay {
    /// Shortest pause (inclusive).
    min_delay_ms: u64,
    /// Longest pause (exclusive).
    max_delay_ms: u64,
}

impl ThinkingDelay {
    /// Creates delay bounds.
    pub fn new(min_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            min_delay_ms,
            max_delay_ms,
        }
    }

    /// No pause at all.
    pub fn none() -> Self {
        Self::new(0, 0)
    }

    /// Draws a pause uniformly from `[min, max)`.
    ///
    /// Collapses to `min` when the range is empty.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let ms = if self.max_delay_ms > self.min_delay_ms {
            rng.random_range(self.min_delay_ms..self.max_delay_ms)
        } else {
            self.min_delay_ms
        };
        Duration::from_millis(ms)
    }

    #[track_caller]
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_delay_ms < self.min_delay_ms {
            return Err(ConfigError::new(format!(
                "max_delay_ms ({}) is below min_delay_ms ({})",
                self.max_delay_ms, self.min_delay_ms
            )));
        }
        Ok(())
    }
}

impl Default for ThinkingDelay {
    fn default() -> Self {
        Self::new(300, 1000)
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
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use strictly_lines::StrategyLevel;

    #[test]
    fn test_parse_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [game]
            board_size = 5
            line_length = 4
            starting_level = "pro"

            [thinking]
            max_delay_ms = 1500
            "#,
        )
        .unwrap();

        assert_eq!(*config.game().board_size(), 5);
        assert_eq!(*config.game().line_length(), 4);
        assert_eq!(*config.game().starting_level(), StrategyLevel::Pro);
        assert!(*config.game().adaptive());
        assert_eq!(*config.thinking().min_delay_ms(), 300);
        assert_eq!(*config.thinking().max_delay_ms(), 1500);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_sample_within_bounds() {
        let delay = ThinkingDelay::new(300, 1000);
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..200 {
            let d = delay.sample(&mut rng);
            assert!(d >= Duration::from_millis(300));
            assert!(d < Duration::from_millis(1000));
        }
    }

    #[test]
    fn test_empty_range_collapses() {
        let mut rng = Pcg32::seed_from_u64(5);
        assert_eq!(ThinkingDelay::none().sample(&mut rng), Duration::ZERO);
        assert_eq!(
            ThinkingDelay::new(40, 40).sample(&mut rng),
            Duration::from_millis(40)
        );
    }

    #[test]
    fn test_from_file_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strictly_lines.toml");
        std::fs::write(&path, "[game]\nboard_size = 4\nseed = 12\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(*config.game().board_size(), 4);
        assert_eq!(*config.game().seed(), Some(12));

        let missing = dir.path().join("absent.toml");
        assert!(AppConfig::from_file(&missing).is_err());
        assert_eq!(AppConfig::load_or_default(&missing).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_inverted_delay_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[thinking]\nmin_delay_ms = 900\nmax_delay_ms = 100\n").unwrap();

        let err = AppConfig::from_file(&path).unwrap_err();
        assert!(err.message.contains("below min_delay_ms"));
    }

    #[test]
    fn test_error_records_location() {
        let err = ConfigError::new("boom".to_string());
        assert_eq!(err.file, file!());
        assert!(err.to_string().starts_with("Config error: boom at "));
    }
}
