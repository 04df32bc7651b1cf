//! Core configuration types

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the REST backend
    pub api_url: String,
    /// Public URL of the dashboard itself
    pub app_url: String,
    /// Display name
    pub app_name: String,
    /// Display version
    pub app_version: String,
    /// Storage key the session provider uses for the access token
    pub token_key: String,
    /// Storage key the session provider uses for the refresh token
    pub refresh_token_key: String,
    /// Storage key of the persisted session snapshot
    pub user_key: String,
    /// Session lifetime granted by the session provider, in seconds
    pub session_max_age_secs: u64,
    /// Backend request timeout, in seconds
    pub request_timeout_secs: u64,
    /// Route table consulted by the route guard
    pub routes: RouteConfig,
}

/// Route classes used by the guard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RouteConfig {
    /// Where unauthenticated visitors of protected pages are sent
    pub login_path: String,
    /// Where authenticated visitors of auth pages are sent
    pub dashboard_path: String,
    /// Path prefixes that require a session
    pub protected_prefixes: Vec<String>,
    /// Path prefixes of the public login/register pages
    pub auth_prefixes: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000/api".to_string(),
            app_url: "http://localhost:3000".to_string(),
            app_name: "ManaHR".to_string(),
            app_version: "1.0.0".to_string(),
            token_key: "manahr_access_token".to_string(),
            refresh_token_key: "manahr_refresh_token".to_string(),
            user_key: "manahr_user".to_string(),
            session_max_age_secs: 7 * 24 * 60 * 60,
            request_timeout_secs: 30,
            routes: RouteConfig::default(),
        }
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            dashboard_path: "/dashboard".to_string(),
            protected_prefixes: [
                "/dashboard",
                "/employees",
                "/attendance",
                "/leaves",
                "/payroll",
                "/documents",
                "/roles",
                "/settings",
            ]
            .iter()
            .map(|p| p.to_string())
            .collect(),
            auth_prefixes: vec!["/login".to_string(), "/register".to_string()],
        }
    }
}

impl AppConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("api_url", &self.api_url),
            ("token_key", &self.token_key),
            ("refresh_token_key", &self.refresh_token_key),
            ("user_key", &self.user_key),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{} cannot be empty", field)));
            }
        }

        if self.session_max_age_secs == 0 {
            return Err(ConfigError::Validation(
                "Session lifetime must be greater than 0".to_string(),
            ));
        }

        self.routes.validate()
    }
}

impl RouteConfig {
    /// Validate the route table
    pub fn validate(&self) -> Result<()> {
        for (field, path) in [
            ("login_path", &self.login_path),
            ("dashboard_path", &self.dashboard_path),
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "{} must start with '/': {}",
                    field, path
                )));
            }
        }

        if let Some(prefix) = self
            .protected_prefixes
            .iter()
            .chain(self.auth_prefixes.iter())
            .find(|p| p.is_empty())
        {
            return Err(ConfigError::Validation(format!(
                "Route prefix cannot be empty: {:?}",
                prefix
            )));
        }

        Ok(())
    }
}
