pub mod generate;
pub mod serve;
pub mod validate;

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// Read a JSON document from disk.
pub fn read_json(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("{} is not valid JSON", path.display()))
}
