//! Configuration management for glance.
//!
//! This crate handles loading, validating, and persisting the settings that
//! decide how widget geometry is picked for screens the device table does
//! not know, and where an extra device table lives.
//!
//! # Overview
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`display`]: Hosting mode and screen scale
//! - [`persistence`]: Config file discovery, reading and writing
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration Sources (Priority)
//!
//! 1. Environment variables (`GLANCE_SCALE`, `GLANCE_PREVIEW`,
//!    `GLANCE_DEVICE_TABLE`)
//! 2. Local config (`./glance.json5` or `./glance.json`)
//! 3. User config (`~/.config/glance/config.json5` or `~/.config/glance/config.json`)
//! 4. Built-in defaults
//!
//! # File Format
//!
//! ```json5
//! {
//!   display: {
//!     // false inside the host app's preview
//!     running_as_extension: true,
//!     scale: 3,
//!   },
//!   device_table: "devices.json5",
//! }
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use glance_config::Config;
//!
//! # fn example() -> glance_config::Result<()> {
//! let config = Config::load()?;
//! println!("Screen scale {}", config.display.scale);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod persistence;

// Re-export primary types at crate root for convenience
pub use config::{Config, ENV_DEVICE_TABLE, ENV_PREVIEW, ENV_SCALE};
pub use display::{DEFAULT_SCALE, DisplayConfig, MAX_SCALE, MIN_SCALE};
pub use error::{ConfigError, Result};
