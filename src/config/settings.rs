//! Configuration settings for plunge.
//!
//! Settings are loaded from `~/.plunge/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::PlungeError;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Timer settings.
    pub timer: TimerSettings,
    /// Journal settings.
    pub journal: JournalConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Local user the journal and profile belong to.
    #[serde(default = "default_user_id")]
    pub user_id: String,
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
    /// Log filter used when neither `RUST_LOG` nor `-v` is given.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Timer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerSettings {
    /// Plain countdown length when none is given.
    #[serde(default = "default_duration_secs")]
    pub default_duration_secs: u32,
    /// A contrast session stopped at or before this many seconds is discarded.
    #[serde(default = "default_minimum_session_secs")]
    pub minimum_session_secs: u32,
    /// Tick period in milliseconds.
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

/// Journal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    /// Number of sessions `history` shows by default.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

// Default value functions for serde
fn default_user_id() -> String {
    "local".to_string()
}

const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

fn default_log_level() -> String {
    "warn".to_string()
}

const fn default_duration_secs() -> u32 {
    120
}

const fn default_minimum_session_secs() -> u32 {
    crate::features::timer::DEFAULT_MINIMUM_SESSION_SECS
}

const fn default_tick_millis() -> u64 {
    1000
}

const fn default_history_limit() -> usize {
    20
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            default_output: default_output_format(),
            color: default_color(),
            log_level: default_log_level(),
        }
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            default_duration_secs: default_duration_secs(),
            minimum_session_secs: default_minimum_session_secs(),
            tick_millis: default_tick_millis(),
        }
    }
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
        }
    }
}

impl TimerSettings {
    /// Tick period, never shorter than one millisecond.
    #[must_use]
    pub fn tick_period(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_millis.max(1))
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, PlungeError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, PlungeError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            PlungeError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            PlungeError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save(&self) -> Result<(), PlungeError> {
        let paths = Paths::new()?;
        paths.ensure_dirs()?;
        self.save_to_path(&paths.config_file)
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), PlungeError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| PlungeError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            PlungeError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.user_id, "local");
        assert_eq!(config.general.default_output, OutputFormat::Pretty);
        assert_eq!(config.general.color, ColorSetting::Auto);
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.timer.default_duration_secs, 120);
        assert_eq!(config.timer.minimum_session_secs, 30);
        assert_eq!(config.timer.tick_millis, 1000);
        assert_eq!(config.journal.history_limit, 20);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.timer.default_duration_secs, 120);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.timer.default_duration_secs = 180;
        config.journal.history_limit = 5;

        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.timer.default_duration_secs, 180);
        assert_eq!(loaded.journal.history_limit, 5);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r"
timer:
  minimum_session_secs: 45
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.timer.minimum_session_secs, 45);
        assert_eq!(config.timer.tick_millis, 1000);
        assert_eq!(config.general.default_output, OutputFormat::Pretty);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "timer: [not, a, map]").unwrap();

        assert!(matches!(
            Config::load_from_path(&config_path),
            Err(PlungeError::Config(_))
        ));
    }

    #[test]
    fn test_tick_period_floor() {
        let settings = TimerSettings {
            tick_millis: 0,
            ..TimerSettings::default()
        };
        assert_eq!(settings.tick_period(), std::time::Duration::from_millis(1));
    }
}
