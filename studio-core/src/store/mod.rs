//! Generated artifact store
//!
//! One `<Name>.model.ts` file per model under a configurable root:
//! ```text
//! generated/models/
//! ├── Product.model.ts
//! └── User.model.ts
//! ```
//! The root directory is created on the first write. Listing or reading a
//! root that does not exist yet is not an error.

use crate::codegen::{self, ARTIFACT_EXTENSION};
use crate::error::{Result, StudioError};
use crate::schema::{is_identifier, ModelSchema};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Entry returned by [`ModelStore::list`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredModel {
    pub name: String,
    pub path: String,
}

/// File-backed store of generated model sources, keyed by model name.
#[derive(Debug, Clone)]
pub struct ModelStore {
    root: PathBuf,
}

impl ModelStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the artifact for `name`, whether or not it exists.
    pub fn artifact_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}{}", name, ARTIFACT_EXTENSION))
    }

    /// All stored artifacts, sorted by model name.
    pub async fn list(&self) -> Result<Vec<StoredModel>> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StudioError::store(&self.root, e)),
        };

        let mut models = Vec::new();
        while let Some(entry) =
            entries.next_entry().await.map_err(|e| StudioError::store(&self.root, e))?
        {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str().and_then(|f| f.strip_suffix(ARTIFACT_EXTENSION))
            else {
                continue;
            };
            if !is_identifier(name) {
                continue;
            }
            models.push(StoredModel {
                name: name.to_string(),
                path: entry.path().display().to_string(),
            });
        }

        models.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(models)
    }

    /// Source text of the artifact for `name`, `None` if there is none.
    pub async fn get(&self, name: &str) -> Result<Option<String>> {
        if !is_identifier(name) {
            return Ok(None);
        }
        let path = self.artifact_path(name);
        match tokio::fs::read_to_string(&path).await {
            Ok(source) => Ok(Some(source)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StudioError::store(path, e)),
        }
    }

    pub async fn exists(&self, name: &str) -> bool {
        is_identifier(name) && tokio::fs::try_exists(self.artifact_path(name)).await.unwrap_or(false)
    }

    /// Generate the artifact for `name` and write it, replacing any previous one.
    pub async fn save(&self, name: &str, schema: &ModelSchema) -> Result<PathBuf> {
        let source = codegen::generate(name, schema)?;
        self.write_artifact(name, &source).await
    }

    /// Write already generated source text for `name`.
    pub async fn write_artifact(&self, name: &str, source: &str) -> Result<PathBuf> {
        if !is_identifier(name) {
            return Err(StudioError::BadRequest(format!("Invalid model name: \"{}\"", name)));
        }

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StudioError::store(&self.root, e))?;

        // Staged write, then rename over the previous artifact
        let path = self.artifact_path(name);
        let staging = path.with_extension("ts.tmp");
        tokio::fs::write(&staging, source).await.map_err(|e| StudioError::store(&staging, e))?;
        tokio::fs::rename(&staging, &path).await.map_err(|e| StudioError::store(&path, e))?;

        log::debug!("Wrote artifact for '{}' to {}", name, path.display());
        Ok(path)
    }

    /// Remove the artifact for `name`. `false` when there was none.
    pub async fn delete(&self, name: &str) -> Result<bool> {
        if !is_identifier(name) {
            return Ok(false);
        }
        let path = self.artifact_path(name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StudioError::store(path, e)),
        }
    }
}
