//! ManaHR Configuration
//!
//! Settings shared by the access core: backend location, storage keys for the
//! persisted session, the route table used by the guard, and session lifetime.
//! Values come from built-in defaults, an optional TOML file and `MANAHR_*`
//! environment variables, in increasing priority.

pub mod error;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use manager::ConfigManager;
pub use types::{AppConfig, RouteConfig};
