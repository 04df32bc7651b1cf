//! Error types for the access model

use thiserror::Error;

/// Result type for access model operations
pub type Result<T> = std::result::Result<T, AccessError>;

/// Errors raised while building access model values
///
/// Evaluating permissions never fails; these only come from constructors
/// and parsers.
#[derive(Error, Debug)]
pub enum AccessError {
    #[error("Invalid permission key: {0}")]
    InvalidPermissionKey(String),

    #[error("Role level must be between 1 and 100, got {0}")]
    InvalidRoleLevel(u8),

    #[error("Data access level must be 1, 2 or 3, got {0}")]
    InvalidDataAccessLevel(u8),
}
