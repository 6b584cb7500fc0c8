//! Error types for the hunt resolver
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for hunt operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the hunt resolver
///
/// Sequence exhaustion and "no locator for a challenge" are deliberately not
/// variants here: both are normal terminal outcomes and surface as
/// `Resolution::Finished` / `Ok(None)` instead.
#[derive(Error, Debug)]
pub enum Error {
    /// No team record matched the given name
    #[error("team not found: {0}")]
    TeamNotFound(String),

    /// Store transport or query failure
    #[error("store error: {0}")]
    Store(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a "team not found" error
    pub fn team_not_found(name: impl Into<String>) -> Self {
        Self::TeamNotFound(name.into())
    }

    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
