//! Configuration handling for dragboard
//!
//! Configuration is read from `config.toml` in the user's config directory,
//! or from an explicit path given with `--config` / `DRAGBOARD_CONFIG`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{HashIdGenerator, IdGenerator, SequentialIdGenerator};
use crate::drag::CancelPolicy;

/// Narrowest column the TUI can lay out (borders, header, one card)
pub const MIN_COLUMN_WIDTH: u16 = 12;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// How new column and task IDs are produced
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// `c-{hash}` / `t-{hash}`
    #[default]
    Hash,
    /// `c1, c2, ...` / `t1, t2, ...`
    Sequential,
}

impl IdStrategy {
    pub fn as_str(&self) -> &str {
        match self {
            IdStrategy::Hash => "hash",
            IdStrategy::Sequential => "sequential",
        }
    }

    pub fn generator(&self) -> Box<dyn IdGenerator> {
        match self {
            IdStrategy::Hash => Box::new(HashIdGenerator::new()),
            IdStrategy::Sequential => Box::new(SequentialIdGenerator::new()),
        }
    }
}

/// Drag gesture settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DragConfig {
    /// Pointer travel (in cells) before a press becomes a drag
    pub activation_distance: u16,

    /// What a drop outside any target does to hover-time task moves
    pub cancel_policy: CancelPolicy,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            activation_distance: 3,
            cancel_policy: CancelPolicy::Keep,
        }
    }
}

/// Terminal UI settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UiConfig {
    /// Width of each column in cells
    pub column_width: u16,

    /// Show task counts in column headers
    pub show_counts: bool,

    /// Event poll interval in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            column_width: 30,
            show_counts: true,
            tick_rate_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct IdsConfig {
    pub strategy: IdStrategy,
}

/// Logging settings; `RUST_LOG` takes precedence over `level`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LogSettings {
    /// Filter directive such as `info` or `dragboard=debug`
    pub level: Option<String>,

    /// Write logs to this file instead of stderr
    pub file: Option<PathBuf>,
}

/// Combined configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub drag: DragConfig,
    pub ui: UiConfig,
    pub ids: IdsConfig,
    pub log: LogSettings,
}

impl Config {
    /// Returns the default config file location
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "dragboard", "dragboard")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Loads configuration
    ///
    /// An explicit path must exist. Without one, a missing default file
    /// yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }

    /// Parses and validates a TOML document
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ui.column_width < MIN_COLUMN_WIDTH {
            return Err(ConfigError::Invalid(format!(
                "ui.column_width must be at least {}, got {}",
                MIN_COLUMN_WIDTH, self.ui.column_width
            )));
        }
        if self.ui.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid(
                "ui.tick_rate_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Serializes the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.drag.activation_distance, 3);
        assert_eq!(config.drag.cancel_policy, CancelPolicy::Keep);
        assert_eq!(config.ids.strategy, IdStrategy::Hash);
        assert!(config.ui.show_counts);
        assert!(config.log.file.is_none());
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[drag]
activation_distance = 5
cancel_policy = "revert"

[ids]
strategy = "sequential"
"#;

        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.drag.activation_distance, 5);
        assert_eq!(config.drag.cancel_policy, CancelPolicy::Revert);
        assert_eq!(config.ids.strategy, IdStrategy::Sequential);
        assert_eq!(config.ui.column_width, 30);
    }

    #[test]
    fn parse_rejects_unknown_policy() {
        let err = Config::from_toml("[drag]\ncancel_policy = \"undo\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn narrow_columns_are_invalid() {
        let err = Config::from_toml("[ui]\ncolumn_width = 4\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_tick_rate_is_invalid() {
        assert!(Config::from_toml("[ui]\ntick_rate_ms = 0\n").is_err());
    }

    #[test]
    fn load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[log]\nlevel = \"debug\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.log.level.as_deref(), Some("debug"));
    }

    #[test]
    fn load_missing_explicit_path_fails() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn toml_round_trip_of_effective_config() {
        let config = Config::default();
        let text = config.to_toml().unwrap();
        assert!(text.contains("activation_distance = 3"));
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn id_strategy_generators() {
        use crate::domain::EntityKind;

        let mut sequential = IdStrategy::Sequential.generator();
        assert_eq!(sequential.next_id(EntityKind::Column).as_str(), "c1");

        let mut hashed = IdStrategy::Hash.generator();
        assert!(hashed.next_id(EntityKind::Task).as_str().starts_with("t-"));
    }
}
