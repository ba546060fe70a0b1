//! Error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching a telemetry snapshot.
///
/// The poll loop treats every variant the same way: log it and wait for the
/// next tick.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection or protocol failure
    #[error("Request failed: {0}")]
    Transport(String),

    /// Non-success HTTP status
    #[error("Endpoint returned HTTP {0}")]
    Status(u16),

    /// Body was not a valid snapshot
    #[error("Malformed telemetry payload: {0}")]
    Decode(String),

    /// Source could not produce a reading
    #[error("Telemetry source unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

/// Errors that can occur while loading or saving configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Explicitly requested file does not exist
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Values failed validation
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// File is not valid JSON
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
