//! Error types for device table loading.
//!
//! Lookups never fail; only reading additional device entries from a file
//! can go wrong.

use std::path::PathBuf;

/// Errors that can occur while loading device metrics.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to read a device table file.
    #[error("failed to read device table at {path}: {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a JSON5 device table.
    #[error("failed to parse device table: {0}")]
    Parse(#[from] serde_json5::Error),

    /// A device key is not a screen height in pixels.
    #[error("invalid screen height key: {0:?}")]
    InvalidHeight(String),

    /// A device entry has unusable dimensions.
    #[error("invalid metrics for screen height {height}: {reason}")]
    InvalidRecord {
        /// The screen height of the offending entry.
        height: u32,
        /// Why the entry was rejected.
        reason: String,
    },

    /// A widget family or crop position name was not recognized.
    #[error("unknown {kind}: {value:?}")]
    UnknownName {
        /// What kind of name was being parsed.
        kind: &'static str,
        /// The unrecognized input.
        value: String,
    },
}

/// A specialized Result type for device metrics operations.
pub type Result<T> = std::result::Result<T, MetricsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = MetricsError::InvalidHeight("tall".to_string());
        assert_eq!(err.to_string(), "invalid screen height key: \"tall\"");

        let err = MetricsError::InvalidRecord {
            height: 2796,
            reason: "small must be positive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid metrics for screen height 2796: small must be positive"
        );
    }
}
