//! Display settings used to pick widget geometry.
//!
//! This module provides the [`DisplayConfig`] type, which describes how the
//! widget is being hosted:
//!
//! - `running_as_extension`: `true` for a real home-screen widget, `false`
//!   for a preview inside the host app
//! - `scale`: pixels per point of the screen (2 on most older phones, 3 on
//!   recent ones)
//!
//! Both only matter when the screen height is not in the device table.

use serde::{Deserialize, Serialize};

/// Default screen scale.
pub const DEFAULT_SCALE: u32 = 3;

/// Minimum allowed screen scale.
pub const MIN_SCALE: u32 = 1;

/// Maximum allowed screen scale.
pub const MAX_SCALE: u32 = 4;

/// How the widget is hosted.
///
/// # Examples
///
/// ```
/// use glance_config::DisplayConfig;
///
/// // Default configuration
/// let config = DisplayConfig::default();
/// assert!(config.running_as_extension);
/// assert_eq!(config.scale, 3);
///
/// // In-app preview
/// let config = DisplayConfig::preview();
/// assert!(!config.running_as_extension);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Whether the widget runs on the home screen rather than in the host
    /// app's preview.
    #[serde(default = "default_running_as_extension")]
    pub running_as_extension: bool,

    /// Pixels per point of the screen.
    #[serde(default = "default_scale")]
    pub scale: u32,
}

fn default_running_as_extension() -> bool {
    true
}

fn default_scale() -> u32 {
    DEFAULT_SCALE
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            running_as_extension: true,
            scale: DEFAULT_SCALE,
        }
    }
}

impl DisplayConfig {
    /// Creates a home-screen display configuration with the given scale.
    ///
    /// # Examples
    ///
    /// ```
    /// use glance_config::DisplayConfig;
    ///
    /// let config = DisplayConfig::with_scale(2);
    /// assert_eq!(config.scale, 2);
    /// assert!(config.running_as_extension);
    /// ```
    #[must_use]
    pub fn with_scale(scale: u32) -> Self {
        Self {
            running_as_extension: true,
            scale,
        }
    }

    /// Creates a display configuration for the host app's preview.
    #[must_use]
    pub fn preview() -> Self {
        Self {
            running_as_extension: false,
            ..Self::default()
        }
    }

    /// Validates the display configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the scale is outside the allowed range.
    pub fn validate(&self) -> crate::Result<()> {
        if self.scale < MIN_SCALE {
            return Err(crate::ConfigError::InvalidScale {
                reason: format!("scale {} is below minimum of {}", self.scale, MIN_SCALE),
            });
        }

        if self.scale > MAX_SCALE {
            return Err(crate::ConfigError::InvalidScale {
                reason: format!("scale {} exceeds maximum of {}", self.scale, MAX_SCALE),
            });
        }

        Ok(())
    }
}
