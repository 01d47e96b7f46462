use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the clock at its input boundaries.
///
/// None of these are fatal: callers log them and keep the clock's
/// current state.
#[derive(Debug, Error)]
pub enum ClockError {
    /// Free-text time input could not be parsed into a time value.
    #[error("invalid time input {input:?}: {reason}")]
    InvalidTimeInput { input: String, reason: &'static str },

    /// The clock config file could not be read.
    #[error("failed to read clock config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The clock config file is not valid JSON for `ClockConfig`.
    #[error("failed to parse clock config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
