/// Application configuration management
/// Reads optional overrides from ~/.config/current-state/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::utils::constants::*;

/// Process-wide settings, read-only after startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// How often the selected metric is refreshed, e.g. "5s" or "1500ms"
    #[serde(with = "humantime_duration")]
    pub refresh_interval: Duration,
    pub min_terminal_width: u16,
    pub left_column_weight: u16,
    pub right_column_weight: u16,
    pub title_height: u16,
    pub footer_height: u16,
    pub top_spacer_height: u16,
    /// Filesystem queried by the disk entry; must be on the allow-list
    pub disk_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            min_terminal_width: DEFAULT_MIN_TERMINAL_WIDTH,
            left_column_weight: DEFAULT_LEFT_COLUMN_WEIGHT,
            right_column_weight: DEFAULT_RIGHT_COLUMN_WEIGHT,
            title_height: DEFAULT_TITLE_HEIGHT,
            footer_height: DEFAULT_FOOTER_HEIGHT,
            top_spacer_height: DEFAULT_TOP_SPACER_HEIGHT,
            disk_path: PathBuf::from(DEFAULT_DISK_PATH),
        }
    }
}

impl AppConfig {
    /// Get config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join(APP_DIR_NAME);
        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from file
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.validate()?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Reject values the UI cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.refresh_interval.is_zero() {
            anyhow::bail!("refresh_interval must be greater than zero");
        }
        if self.min_terminal_width == 0 {
            anyhow::bail!("min_terminal_width must be greater than zero");
        }
        if self.left_column_weight == 0 || self.right_column_weight == 0 {
            anyhow::bail!("column weights must be greater than zero");
        }
        Ok(())
    }
}

mod humantime_duration {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&humantime::format_duration(*value).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.refresh_interval, Duration::from_secs(5));
        assert_eq!(config.min_terminal_width, 80);
    }

    #[test]
    fn test_partial_override() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "refresh_interval = \"1500ms\"").unwrap();
        writeln!(file, "min_terminal_width = 100").unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();

        assert_eq!(config.refresh_interval, Duration::from_millis(1500));
        assert_eq!(config.min_terminal_width, 100);
        assert_eq!(config.right_column_weight, DEFAULT_RIGHT_COLUMN_WEIGHT);
        assert_eq!(config.disk_path, PathBuf::from("/"));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "refresh_interval = \"0s\"").unwrap();

        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("refresh_interval"));
    }

    #[test]
    fn test_bad_duration_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "refresh_interval = \"soon\"").unwrap();

        assert!(AppConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = AppConfig {
            refresh_interval: Duration::from_secs(2),
            ..AppConfig::default()
        };
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("refresh_interval = \"2s\""));
        assert_eq!(toml::from_str::<AppConfig>(&text).unwrap(), config);
    }
}
