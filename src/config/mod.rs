//! Configuration for typed-scalar coercion during matching.
//!
//! Matching a tree against a spec sometimes has to coerce a tree value into
//! the spec's type: a string into a datetime, a number into a decimal. This
//! module holds the knobs for that coercion, with sensible defaults and
//! support for loading from TOML via serde.
//!
//! # Example
//!
//! ```
//! use deepquill::config::Config;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert!(config.numeric_timestamps);
//! assert!(config.datetime_formats.is_empty());
//!
//! // Accept US-style dates as well
//! let custom = Config {
//!     datetime_formats: vec!["%m/%d/%Y %H:%M".to_string()],
//!     ..Config::default()
//! };
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Coercion settings used by the matching engine.
///
/// # Fields
///
/// * `datetime_formats` - Extra `chrono` formats tried when parsing datetime strings (default: none)
/// * `numeric_timestamps` - Accept numbers as Unix timestamps for datetime specs (default: true)
/// * `decimal_from_numbers` - Accept integers and floats for decimal specs (default: true)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Extra datetime formats, tried after RFC 3339 and the built-in ISO forms.
    /// Values parsed with these formats are interpreted as UTC.
    #[serde(default)]
    pub datetime_formats: Vec<String>,

    /// Numbers compared against a datetime spec are Unix timestamps in seconds
    #[serde(default = "default_numeric_timestamps")]
    pub numeric_timestamps: bool,

    /// Integers and floats compared against a decimal spec are converted
    #[serde(default = "default_decimal_from_numbers")]
    pub decimal_from_numbers: bool,
}

/// Returns the default for numeric timestamps.
fn default_numeric_timestamps() -> bool {
    true
}

/// Returns the default for decimal coercion from numbers.
fn default_decimal_from_numbers() -> bool {
    true
}

impl Default for Config {
    /// Creates a new configuration with default values.
    ///
    /// # Default Values
    ///
    /// * `datetime_formats`: empty
    /// * `numeric_timestamps`: true
    /// * `decimal_from_numbers`: true
    fn default() -> Self {
        Self {
            datetime_formats: Vec::new(),
            numeric_timestamps: default_numeric_timestamps(),
            decimal_from_numbers: default_decimal_from_numbers(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/deepquill/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("deepquill");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        let config_path = match Self::config_path() {
            Some(path) => path,
            None => return Self::default(),
        };

        if !config_path.exists() {
            return Self::default();
        }

        Self::load_from(&config_path).unwrap_or_else(|err| {
            log::debug!("ignoring unreadable config {}: {:#}", config_path.display(), err);
            Self::default()
        })
    }

    /// Loads configuration from a specific TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load_from<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Saves configuration to a specific file, creating parent directories.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Saves configuration to the default config file.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(config_path)
    }
}
