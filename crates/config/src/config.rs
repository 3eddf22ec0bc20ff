//! Core configuration struct and loading logic.
//!
//! This module provides the main [`Config`] struct which aggregates all
//! configuration options for glance.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::display::DisplayConfig;
use crate::error::{ConfigError, Result};
use crate::persistence::{find_config_file, read_config_file, write_config_file};

/// Environment variable overriding [`DisplayConfig::scale`].
pub const ENV_SCALE: &str = "GLANCE_SCALE";

/// Environment variable overriding [`DisplayConfig::running_as_extension`].
pub const ENV_PREVIEW: &str = "GLANCE_PREVIEW";

/// Environment variable overriding [`Config::device_table`].
pub const ENV_DEVICE_TABLE: &str = "GLANCE_DEVICE_TABLE";

/// The main configuration struct for glance.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use glance_config::{Config, DisplayConfig};
///
/// // Create a default config
/// let config = Config::default();
/// assert!(config.device_table.is_none());
///
/// // Create a custom config
/// let config = Config {
///     display: DisplayConfig::with_scale(2),
///     device_table: Some(PathBuf::from("devices.json5")),
/// };
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// How the widget is hosted.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Additional device table merged over the builtin one.
    ///
    /// Relative paths are resolved against the directory of the config file
    /// when loaded through [`Config::load_from`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_table: Option<PathBuf>,
}

impl Config {
    /// Creates a new default configuration.
    ///
    /// This is equivalent to `Config::default()`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from the default file locations.
    ///
    /// Searches for configuration files in the following order:
    ///
    /// 1. Local: `./glance.json5` or `./glance.json`
    /// 2. User: `~/.config/glance/config.json5` or `~/.config/glance/config.json`
    ///
    /// If no configuration file is found, returns a default configuration.
    /// Environment overrides are applied in both cases.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be
    /// read or parsed, or if an environment override is invalid.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use glance_config::Config;
    ///
    /// # fn example() -> glance_config::Result<()> {
    /// let config = Config::load()?;
    /// println!("Screen scale {}", config.display.scale);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load() -> Result<Self> {
        let config = match find_config_file() {
            Some(path) => {
                debug!(path = %path.display(), "loading config file");
                Self::read(&path)?
            }
            None => {
                debug!("no config file found, using defaults");
                Self::default()
            }
        };
        let config = config.with_env_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use glance_config::Config;
    ///
    /// # fn example() -> glance_config::Result<()> {
    /// let config = Config::load_from("custom-config.json5")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self::read(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self> {
        let mut config: Config = read_config_file(path)?;
        if let Some(table) = config.device_table.as_mut().filter(|t| t.is_relative()) {
            if let Some(dir) = path.parent() {
                *table = dir.join(&*table);
            }
        }
        Ok(config)
    }

    /// Saves the configuration to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        write_config_file(path, self)
    }

    /// Applies environment overrides.
    ///
    /// `lookup` returns the value of a variable, if set. Recognized variables
    /// are [`ENV_SCALE`] (an integer), [`ENV_PREVIEW`] (`1`/`true`/`yes` or
    /// `0`/`false`/`no`), and [`ENV_DEVICE_TABLE`] (a path).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if a variable cannot be parsed.
    ///
    /// # Examples
    ///
    /// ```
    /// use glance_config::Config;
    ///
    /// let config = Config::default()
    ///     .with_env_overrides(|name| (name == "GLANCE_SCALE").then(|| "2".to_string()))
    ///     .unwrap();
    /// assert_eq!(config.display.scale, 2);
    /// ```
    pub fn with_env_overrides(
        mut self,
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<Self> {
        if let Some(value) = lookup(ENV_SCALE) {
            self.display.scale = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: ENV_SCALE,
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup(ENV_PREVIEW) {
            let preview = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        name: ENV_PREVIEW,
                        value,
                    });
                }
            };
            self.display.running_as_extension = !preview;
        }

        if let Some(value) = lookup(ENV_DEVICE_TABLE).filter(|v| !v.is_empty()) {
            self.device_table = Some(PathBuf::from(value));
        }

        Ok(self)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use glance_config::{Config, DisplayConfig};
    ///
    /// let mut config = Config::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.display = DisplayConfig::with_scale(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        self.display.validate()?;
        Ok(())
    }
}
