//! In-process document collection for one registered model.

use super::document::{self, RESERVED_KEYS};
use crate::error::{Result, StudioError};
use crate::schema::ModelSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::RwLock;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

/// One page of a collection listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub data: Vec<Value>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

/// Documents of one model, kept in insertion order.
pub struct Collection {
    name: String,
    schema: ModelSchema,
    documents: RwLock<Vec<Map<String, Value>>>,
}

impl Collection {
    pub fn new(name: impl Into<String>, schema: ModelSchema) -> Self {
        Self { name: name.into(), schema, documents: RwLock::new(Vec::new()) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &ModelSchema {
        &self.schema
    }

    pub async fn count(&self) -> usize {
        self.documents.read().await.len()
    }

    /// 1-based page of documents. Out-of-range values are clamped.
    pub async fn list(&self, page: usize, limit: usize) -> Page {
        let page = page.max(1);
        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        let documents = self.documents.read().await;
        let data = documents
            .iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .cloned()
            .map(Value::Object)
            .collect();
        Page { data, total: documents.len(), page, limit }
    }

    pub async fn get(&self, id: &str) -> Option<Value> {
        let documents = self.documents.read().await;
        documents.iter().find(|d| id_of(d) == Some(id)).cloned().map(Value::Object)
    }

    pub async fn insert(&self, input: &Value) -> Result<Value> {
        let mut doc = document::prepare(&self.schema, input).map_err(StudioError::Validation)?;

        let mut documents = self.documents.write().await;
        self.check_unique(&documents, &doc, None)?;

        let now = chrono::Utc::now().to_rfc3339();
        doc.insert("_id".to_string(), Value::String(uuid::Uuid::new_v4().to_string()));
        doc.insert("createdAt".to_string(), Value::String(now.clone()));
        doc.insert("updatedAt".to_string(), Value::String(now));

        documents.push(doc.clone());
        log::debug!("Inserted document into '{}' ({} total)", self.name, documents.len());
        Ok(Value::Object(doc))
    }

    /// Merge `changes` into the document and re-check the result.
    pub async fn update(&self, id: &str, changes: &Value) -> Result<Value> {
        let Some(changes) = changes.as_object() else {
            return Err(StudioError::Validation(vec!["Document must be a JSON object".into()]));
        };

        let mut documents = self.documents.write().await;
        let index = documents
            .iter()
            .position(|d| id_of(d) == Some(id))
            .ok_or_else(|| self.not_found(id))?;

        let mut merged = documents[index].clone();
        for (key, value) in changes {
            if !RESERVED_KEYS.contains(&key.as_str()) {
                merged.insert(key.clone(), value.clone());
            }
        }
        let mut doc = document::prepare(&self.schema, &Value::Object(merged))
            .map_err(StudioError::Validation)?;
        self.check_unique(&documents, &doc, Some(id))?;

        let previous = &documents[index];
        for key in RESERVED_KEYS {
            if let Some(value) = previous.get(*key) {
                doc.insert(key.to_string(), value.clone());
            }
        }
        doc.insert("updatedAt".to_string(), Value::String(chrono::Utc::now().to_rfc3339()));

        documents[index] = doc.clone();
        Ok(Value::Object(doc))
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let mut documents = self.documents.write().await;
        let index = documents
            .iter()
            .position(|d| id_of(d) == Some(id))
            .ok_or_else(|| self.not_found(id))?;
        documents.remove(index);
        Ok(())
    }

    fn check_unique(
        &self,
        documents: &[Map<String, Value>],
        doc: &Map<String, Value>,
        skip_id: Option<&str>,
    ) -> Result<()> {
        let mut errors = Vec::new();
        for (name, _) in self.schema.iter().filter(|(_, f)| f.unique) {
            let Some(value) = doc.get(name) else { continue };
            let taken = documents
                .iter()
                .filter(|d| skip_id.is_none() || id_of(d) != skip_id)
                .any(|d| d.get(name) == Some(value));
            if taken {
                errors.push(format!("Duplicate value for unique field '{}': {}", name, value));
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(StudioError::Validation(errors))
        }
    }

    fn not_found(&self, id: &str) -> StudioError {
        StudioError::NotFound(format!("Document {} not found in {}", id, self.name))
    }
}

fn id_of(doc: &Map<String, Value>) -> Option<&str> {
    doc.get("_id").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn products() -> Collection {
        let schema = ModelSchema::from_json(&json!({
            "sku": { "type": "string", "required": true, "unique": true },
            "price": { "type": "number", "min": 0 }
        }))
        .unwrap();
        Collection::new("Product", schema)
    }

    #[tokio::test]
    async fn test_insert_stamps_id_and_timestamps() {
        let col = products();
        let doc = col.insert(&json!({ "sku": "A-1", "price": 3 })).await.unwrap();

        let id = doc["_id"].as_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());
        assert_eq!(doc["createdAt"], doc["updatedAt"]);
        assert_eq!(col.get(id).await.unwrap(), doc);
        assert_eq!(col.count().await, 1);
    }

    #[tokio::test]
    async fn test_unique_fields() {
        let col = products();
        col.insert(&json!({ "sku": "A-1" })).await.unwrap();
        let err = col.insert(&json!({ "sku": "A-1" })).await.unwrap_err();
        assert!(err.validation_errors()[0].contains("Duplicate value for unique field 'sku'"));
    }

    #[tokio::test]
    async fn test_update_merges_and_keeps_identity() {
        let col = products();
        let doc = col.insert(&json!({ "sku": "A-1", "price": 3 })).await.unwrap();
        let id = doc["_id"].as_str().unwrap().to_string();

        let updated = col.update(&id, &json!({ "price": 5, "_id": "hijack" })).await.unwrap();
        assert_eq!(updated["_id"], json!(id));
        assert_eq!(updated["sku"], json!("A-1"));
        assert_eq!(updated["price"], json!(5));
        assert_eq!(updated["createdAt"], doc["createdAt"]);

        // Re-saving its own unique value is not a conflict
        col.update(&id, &json!({ "sku": "A-1" })).await.unwrap();

        let err = col.update(&id, &json!({ "price": -1 })).await.unwrap_err();
        assert!(matches!(err, StudioError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_and_missing_ids() {
        let col = products();
        let doc = col.insert(&json!({ "sku": "A-1" })).await.unwrap();
        let id = doc["_id"].as_str().unwrap();

        col.delete(id).await.unwrap();
        assert!(col.get(id).await.is_none());
        assert!(matches!(col.delete(id).await.unwrap_err(), StudioError::NotFound(_)));
        assert!(matches!(
            col.update(id, &json!({})).await.unwrap_err(),
            StudioError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_paging() {
        let col = products();
        for i in 0..25 {
            col.insert(&json!({ "sku": format!("S-{i}") })).await.unwrap();
        }

        let page = col.list(3, 10).await;
        assert_eq!(page.total, 25);
        assert_eq!(page.data.len(), 5);
        assert_eq!(page.data[0]["sku"], json!("S-20"));

        let clamped = col.list(0, 1000).await;
        assert_eq!(clamped.page, 1);
        assert_eq!(clamped.limit, MAX_PAGE_SIZE);
        assert_eq!(clamped.data.len(), 25);
    }
}
