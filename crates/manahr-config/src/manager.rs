//! Configuration manager implementation

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use tracing::debug;

use crate::{error::Result, types::AppConfig};

const DEFAULT_ENV_PREFIX: &str = "MANAHR";

/// Loads and saves [`AppConfig`]
pub struct ConfigManager {
    /// Configuration file path
    config_path: PathBuf,
    /// Environment prefix
    env_prefix: String,
}

impl ConfigManager {
    /// Create a new configuration manager
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
        }
    }

    /// Create with custom config path
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: path,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
        }
    }

    /// Use a different environment variable prefix
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = prefix.to_string();
        self
    }

    /// Path of the configuration file
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Get default config path (`<config dir>/manahr/config.toml`)
    fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("manahr")
            .join("config.toml")
    }

    /// Load configuration: defaults, then the file, then the environment
    ///
    /// Nested keys use a double underscore, e.g. `MANAHR_ROUTES__LOGIN_PATH`.
    pub fn load_config(&self) -> Result<AppConfig> {
        let path = self.config_path.to_string_lossy().to_string();
        let builder = Config::builder()
            .add_source(File::new(&path, FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .prefix_separator("_")
                    .separator("__"),
            );

        let app_config: AppConfig = builder.build()?.try_deserialize()?;
        app_config.validate()?;

        debug!(path = %self.config_path.display(), "Configuration loaded");
        Ok(app_config)
    }

    /// Save configuration as TOML
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        config.validate()?;
        let toml = toml::to_string_pretty(config)?;
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.config_path, toml)?;

        debug!(path = %self.config_path.display(), "Configuration saved");
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
