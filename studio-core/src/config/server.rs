//! Server configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server listening port
    /// Env: STUDIO_PORT
    /// Default: 3001
    pub port: u16,

    /// Server listening address
    /// Env: STUDIO_HOST
    /// Default: "127.0.0.1"
    pub host: String,

    /// Enable CORS support
    /// Env: STUDIO_CORS_ENABLED
    /// Default: true
    pub cors_enabled: bool,

    /// Allowed CORS origins, `*` allows any
    /// Env: STUDIO_CORS_ORIGINS (comma-separated)
    /// Default: the local UI dev servers
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes
    /// Env: STUDIO_MAX_BODY_SIZE
    /// Default: 1048576 (1MB)
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            host: "127.0.0.1".to_string(),
            cors_enabled: true,
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "http://localhost:5173".to_string(),
            ],
            max_body_size: 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: Self) {
        self.port = other.port;
        self.host = other.host;
        self.cors_enabled = other.cors_enabled;
        self.cors_origins = other.cors_origins;
        self.max_body_size = other.max_body_size;
    }

    /// Apply environment variables
    pub fn apply_env_vars(&mut self) {
        self.apply_vars(|key| env::var(key).ok());
    }

    pub(crate) fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(port) = var("STUDIO_PORT") {
            if let Ok(p) = port.parse() {
                self.port = p;
            }
        }

        if let Some(host) = var("STUDIO_HOST") {
            self.host = host;
        }

        if let Some(enabled) = var("STUDIO_CORS_ENABLED") {
            self.cors_enabled = enabled.parse().unwrap_or(false);
        }

        if let Some(origins) = var("STUDIO_CORS_ORIGINS") {
            self.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Some(size) = var("STUDIO_MAX_BODY_SIZE") {
            if let Ok(s) = size.parse() {
                self.max_body_size = s;
            }
        }
    }

    /// `host:port` as passed to the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether a browser `Origin` may call the API.
    pub fn allows_origin(&self, origin: &str) -> bool {
        self.cors_origins.iter().any(|o| o == "*" || o == origin)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            bail!("Invalid host: host cannot be empty");
        }

        if self.max_body_size == 0 {
            bail!("Invalid max_body_size: must be greater than 0");
        }

        if self.cors_enabled && self.cors_origins.is_empty() {
            bail!("CORS is enabled but no origins are configured");
        }

        Ok(())
    }
}
