//! Configuration system for Mongo Studio
//!
//! Values are resolved in the following order (highest priority wins):
//!
//! 1. **Code / CLI flags**
//! 2. **Environment variables** (`STUDIO_*`)
//! 3. **Config file** (`studio.toml`)
//! 4. **Defaults**
//!
//! # Example
//!
//! ```no_run
//! use studio_core::config::StudioConfig;
//!
//! let config = StudioConfig::load()?;
//! let config = StudioConfig::load_from("deploy/studio.toml")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod logging;
pub mod server;
pub mod storage;

pub use logging::LoggingConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "studio.toml";

/// Complete Mongo Studio configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl StudioConfig {
    /// Defaults, then `studio.toml` if present, then environment variables.
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Same as [`load`](Self::load) with an explicit file. A missing file is skipped.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut config = Self::default();

        if path.exists() {
            let file_config = Self::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            config.merge(file_config);
        }

        config.apply_env_vars();

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.as_ref().display()))
    }

    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: Self) {
        self.server.merge(other.server);
        self.storage.merge(other.storage);
        self.logging.merge(other.logging);
    }

    pub fn apply_env_vars(&mut self) {
        self.server.apply_env_vars();
        self.storage.apply_env_vars();
        self.logging.apply_env_vars();
    }

    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.storage.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
