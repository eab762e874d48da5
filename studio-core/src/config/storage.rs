//! Storage configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding generated `<Name>.model.ts` files
    /// Env: STUDIO_MODELS_PATH, then MODELS_PATH
    /// Default: "./generated/models"
    pub models_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { models_path: "./generated/models".to_string() }
    }
}

impl StorageConfig {
    pub fn merge(&mut self, other: Self) {
        *self = other;
    }

    pub fn apply_env_vars(&mut self) {
        self.apply_vars(|key| env::var(key).ok());
    }

    pub(crate) fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(path) = var("STUDIO_MODELS_PATH").or_else(|| var("MODELS_PATH")) {
            self.models_path = path;
        }
    }

    pub fn models_dir(&self) -> PathBuf {
        PathBuf::from(&self.models_path)
    }

    pub fn validate(&self) -> Result<()> {
        if self.models_path.trim().is_empty() {
            bail!("Invalid models_path: path cannot be empty");
        }
        Ok(())
    }
}
