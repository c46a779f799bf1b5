//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::storage::{CorruptPolicy, FileSlotStore, DEFAULT_SLOT_KEY};
use crate::tracker::{DateFormat, DateFormatError, DEFAULT_DATE_FORMAT};
use crate::view::{TextStyle, ViewOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the entry list lives
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_slot_key")]
    pub slot_key: String,

    #[serde(default)]
    pub on_corrupt: CorruptPolicy,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("lightlog").to_string_lossy().to_string())
        .unwrap_or_else(|| "./lightlog_data".to_string())
}

fn default_slot_key() -> String {
    DEFAULT_SLOT_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            slot_key: default_slot_key(),
            on_corrupt: CorruptPolicy::default(),
        }
    }
}

impl StorageConfig {
    /// Data directory with a leading `~/` expanded
    pub fn data_path(&self) -> PathBuf {
        expand_home(&self.data_dir)
    }

    pub fn slot_store(&self) -> FileSlotStore {
        FileSlotStore::new(self.data_path())
    }
}

/// How the page is drawn
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_unit")]
    pub unit: String,

    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default = "default_chart_height")]
    pub chart_height: usize,

    #[serde(default = "default_column_width")]
    pub column_width: usize,

    #[serde(default = "default_chart_width")]
    pub chart_width: usize,
}

fn default_unit() -> String {
    "kg".to_string()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_chart_height() -> usize {
    8
}

fn default_column_width() -> usize {
    7
}

fn default_chart_width() -> usize {
    70
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            unit: default_unit(),
            date_format: default_date_format(),
            chart_height: default_chart_height(),
            column_width: default_column_width(),
            chart_width: default_chart_width(),
        }
    }
}

impl DisplayConfig {
    pub fn date_format(&self) -> Result<DateFormat, ConfigError> {
        DateFormat::new(self.date_format.clone()).map_err(ConfigError::DateFormat)
    }

    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            unit: self.unit.clone(),
        }
    }

    pub fn text_style(&self) -> TextStyle {
        TextStyle {
            chart_height: self.chart_height,
            column_width: self.column_width,
            max_plot_width: self.chart_width,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration text without touching the environment
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Candidate config files, in search order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("lightlog").join("config.toml")),
            Some(PathBuf::from("./lightlog.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load the first existing default config file, or environment-only config.
    ///
    /// Returns the file that was used, if any. A file that exists but cannot
    /// be read or parsed is an error rather than being skipped.
    pub fn discover() -> Result<(Self, Option<PathBuf>), ConfigError> {
        for path in Self::default_paths() {
            if path.exists() {
                let config = Self::load_with_env(&path)?;
                return Ok((config, Some(path)));
            }
        }
        Ok((Self::from_env(), None))
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.display.date_format()?;

        if self.storage.slot_key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage.slot_key must not be empty".to_string()));
        }
        if self.display.chart_height < 2 {
            return Err(ConfigError::Invalid("display.chart_height must be at least 2".to_string()));
        }
        if self.display.column_width == 0 {
            return Err(ConfigError::Invalid("display.column_width must be at least 1".to_string()));
        }
        if self.display.chart_width == 0 {
            return Err(ConfigError::Invalid("display.chart_width must be at least 1".to_string()));
        }
        match self.logging.format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(ConfigError::Invalid(format!(
                "logging.format must be \"pretty\" or \"json\", got {:?}",
                other
            ))),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Storage overrides
        if let Ok(data_dir) = std::env::var("LIGHTLOG_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }
        if let Ok(slot) = std::env::var("LIGHTLOG_SLOT") {
            self.storage.slot_key = slot;
        }

        // Display overrides
        if let Ok(unit) = std::env::var("LIGHTLOG_UNIT") {
            self.display.unit = unit;
        }

        // Logging overrides
        if let Ok(level) = std::env::var("LIGHTLOG_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("LIGHTLOG_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid display.date_format: {0}")]
    DateFormat(DateFormatError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Lightlog Configuration
#
# Environment variables override these settings:
# - LIGHTLOG_DATA_DIR
# - LIGHTLOG_SLOT
# - LIGHTLOG_UNIT
# - LIGHTLOG_LOG_LEVEL
# - LIGHTLOG_LOG_FORMAT

[storage]
# Directory holding the slot files
data_dir = "~/.local/share/lightlog"

# Name of the slot holding the entry list (<data_dir>/<slot_key>.json)
slot_key = "my_weights"

# What to do when the slot cannot be parsed:
# "fail" stops with an error, "empty" starts over (the next save overwrites it)
on_corrupt = "fail"

[display]
# Unit shown after weights
unit = "kg"

# strftime pattern for entry dates
date_format = "%m/%d"

# Chart rows
chart_height = 8

# Characters per entry along the chart's X axis
column_width = 7

# Widest the chart plot may get; longer histories are narrowed, then sampled
chart_width = 70

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty or json
format = "pretty"

# Optional log file path (default: stderr)
# file = "/tmp/lightlog.log"
"#
    .to_string()
}
