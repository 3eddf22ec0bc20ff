//! Configuration file discovery, reading and writing.
//!
//! JSON5 (`.json5`) is preferred since it allows comments and trailing
//! commas; plain JSON (`.json`) parses through the same reader. Files are
//! always written back as pretty-printed JSON.
//!
//! # File Locations
//!
//! Configuration is searched in the following order:
//!
//! 1. Local: `./glance.json5` or `./glance.json`
//! 2. User: `~/.config/glance/config.json5` or `~/.config/glance/config.json`

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConfigError, Result};

/// Local configuration file names, in priority order.
const LOCAL_FILE_NAMES: &[&str] = &["glance.json5", "glance.json"];

/// User config directory name.
const USER_CONFIG_DIR: &str = "glance";

/// User config file names, in priority order.
const USER_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Finds the configuration file path.
///
/// Looks in the current directory first, then in the user config directory.
/// Returns `None` when neither holds a configuration file.
///
/// # Examples
///
/// ```no_run
/// use glance_config::persistence::find_config_file;
///
/// if let Some(path) = find_config_file() {
///     println!("Found config at: {}", path.display());
/// }
/// ```
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    let user_dir = user_config_dir()
        .inspect_err(|e| debug!("skipping user config: {e}"))
        .ok();
    find_config_file_in(Path::new("."), user_dir.as_deref())
}

/// Finds the configuration file under explicit local and user directories.
///
/// This is the search behind [`find_config_file`], with both roots supplied
/// by the caller.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use glance_config::persistence::find_config_file_in;
///
/// let found = find_config_file_in(Path::new("/nonexistent"), None);
/// assert!(found.is_none());
/// ```
#[must_use]
pub fn find_config_file_in(local_dir: &Path, user_dir: Option<&Path>) -> Option<PathBuf> {
    let local = LOCAL_FILE_NAMES.iter().map(|name| local_dir.join(name));
    let user = user_dir
        .into_iter()
        .flat_map(|dir| USER_FILE_NAMES.iter().map(move |name| dir.join(name)));

    let found = local.chain(user).find(|path| path.is_file());
    if let Some(path) = &found {
        debug!(path = %path.display(), "found config file");
    }
    found
}

/// Returns the user configuration directory, typically `~/.config/glance/`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn user_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(USER_CONFIG_DIR))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Reads and parses a configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its content cannot be
/// parsed into `T`.
///
/// # Examples
///
/// ```no_run
/// use glance_config::persistence::read_config_file;
/// use glance_config::Config;
///
/// # fn main() -> glance_config::Result<()> {
/// let config: Config = read_config_file("glance.json5")?;
/// # Ok(())
/// # }
/// ```
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json5::from_str(&content).map_err(ConfigError::from)
}

/// Writes a configuration to a file as pretty-printed JSON.
///
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created, the value
/// cannot be serialized, or the file cannot be written.
pub fn write_config_file<T: serde::Serialize>(path: impl AsRef<Path>, config: &T) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty() && !p.exists())
    {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let content = serde_json::to_string_pretty(config)?;

    std::fs::write(path, content).map_err(|e| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })
}
