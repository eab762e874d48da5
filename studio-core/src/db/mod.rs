//! Live model table
//!
//! The set of models the document database currently knows about, together
//! with each model's collection. It is an explicit object owned by the
//! server state rather than process-global, and registration is a single
//! atomic insert-if-absent so that two concurrent creations of the same
//! model cannot both win.

pub mod collection;
pub mod document;

pub use collection::{Collection, Page, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

use crate::schema::ModelSchema;
use scc::HashMap as SccHashMap;
use std::sync::Arc;

/// Registry of live models.
#[async_trait::async_trait]
pub trait ModelTable: Send + Sync {
    /// Register `name` with an empty collection. `false` if already registered.
    async fn register(&self, name: &str, schema: ModelSchema) -> bool;

    /// Drop `name` and its collection. `false` if it was not registered.
    async fn unregister(&self, name: &str) -> bool;

    async fn contains(&self, name: &str) -> bool;

    async fn collection(&self, name: &str) -> Option<Arc<Collection>>;

    /// Registered model names, sorted.
    async fn names(&self) -> Vec<String>;
}

/// Lock-free in-memory model table.
#[derive(Default)]
pub struct MemoryDatabase {
    models: SccHashMap<String, Arc<Collection>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[async_trait::async_trait]
impl ModelTable for MemoryDatabase {
    async fn register(&self, name: &str, schema: ModelSchema) -> bool {
        match self.models.entry_async(name.to_string()).await {
            scc::hash_map::Entry::Occupied(_) => false,
            scc::hash_map::Entry::Vacant(v) => {
                v.insert_entry(Arc::new(Collection::new(name, schema)));
                log::info!("Registered model '{}'", name);
                true
            }
        }
    }

    async fn unregister(&self, name: &str) -> bool {
        let removed = self.models.remove_async(name).await.is_some();
        if removed {
            log::info!("Unregistered model '{}'", name);
        }
        removed
    }

    async fn contains(&self, name: &str) -> bool {
        self.models.read_async(name, |_, _| ()).await.is_some()
    }

    async fn collection(&self, name: &str) -> Option<Arc<Collection>> {
        self.models.read_async(name, |_, c| c.clone()).await
    }

    async fn names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.models.len());
        self.models
            .retain_async(|name, _| {
                names.push(name.clone());
                true
            })
            .await;
        names.sort();
        names
    }
}
