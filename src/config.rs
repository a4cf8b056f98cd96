//! Settings loaded from an optional TOML file.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Delays before deferred transitions become visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delays {
    /// Pause before the computer answers a human move.
    pub computer_move: Duration,
    /// Pause before a full board is declared a draw.
    pub declare_draw: Duration,
}

impl Delays {
    /// No pauses at all, for headless play.
    pub const IMMEDIATE: Delays = Delays {
        computer_move: Duration::ZERO,
        declare_draw: Duration::ZERO,
    };
}

/// User-configurable settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Milliseconds before the computer moves.
    computer_delay_ms: u64,

    /// Milliseconds before a draw is declared.
    draw_delay_ms: u64,

    /// Ring the terminal bell on moves and wins.
    sound: bool,

    /// File the terminal UI writes its log to.
    log_file: PathBuf,

    /// Filter directive used when `RUST_LOG` is unset.
    log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            computer_delay_ms: 1000,
            draw_delay_ms: 500,
            sound: true,
            log_file: PathBuf::from("strictly_solo.log"),
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read settings file: {}", e)))?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse settings: {}", e)))?;

        info!(?settings, "Settings loaded");
        Ok(settings)
    }

    /// Loads settings from `path` if it exists, defaults otherwise.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("Settings file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Turns sound off regardless of the file.
    pub fn mute(&mut self) {
        self.sound = false;
    }

    /// Timer delays for the session driver.
    pub fn delays(&self) -> Delays {
        Delays {
            computer_move: Duration::from_millis(self.computer_delay_ms),
            declare_draw: Duration::from_millis(self.draw_delay_ms),
        }
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
    use std::io::Write;

    #[test]
    fn test_defaults_match_original_timings() {
        let settings = Settings::default();
        assert_eq!(settings.delays().computer_move, Duration::from_millis(1000));
        assert_eq!(settings.delays().declare_draw, Duration::from_millis(500));
        assert!(*settings.sound());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "computer_delay_ms = 250\nsound = false").unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(*settings.computer_delay_ms(), 250);
        assert!(!*settings.sound());
        assert_eq!(*settings.draw_delay_ms(), 500);
        assert_eq!(settings.log_filter(), "info");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "computer_delay_ms = \"soon\"").unwrap();

        let err = Settings::load_or_default(file.path()).unwrap_err();
        assert!(err.message.contains("Failed to parse settings"));
    }

    #[test]
    fn test_mute_overrides_file() {
        let mut settings = Settings::default();
        settings.mute();
        assert!(!*settings.sound());
    }
}
