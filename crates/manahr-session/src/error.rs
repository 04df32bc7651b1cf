//! Error types for session persistence

use thiserror::Error;

/// Result type for session operations
pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// Errors raised by snapshot persistence
///
/// The identity store itself never surfaces these to callers; it logs them
/// and keeps its in-memory state.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported snapshot version: {0}")]
    UnsupportedVersion(u32),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
