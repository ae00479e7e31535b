use std::io;
use thiserror::Error;

/// Custom error type for hostwatch
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Probe failed: {0}")]
    Probe(String),

    #[error("Timed out after {secs}s: {what}")]
    Timeout { what: String, secs: u64 },

    #[error("Alert sink error: {0}")]
    Sink(String),

    #[error("Email error: {0}")]
    Email(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for hostwatch
pub type Result<T> = std::result::Result<T, WatchError>;

impl WatchError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        WatchError::Config(msg.into())
    }

    /// Create a probe error
    pub fn probe<S: Into<String>>(msg: S) -> Self {
        WatchError::Probe(msg.into())
    }

    pub fn timeout<S: Into<String>>(what: S, secs: u64) -> Self {
        WatchError::Timeout {
            what: what.into(),
            secs,
        }
    }

    /// Create a sink error
    pub fn sink<S: Into<String>>(msg: S) -> Self {
        WatchError::Sink(msg.into())
    }

    pub fn email<S: Into<String>>(msg: S) -> Self {
        WatchError::Email(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        WatchError::Other(msg.into())
    }
}
