//! Request dispatch
//!
//! ```text
//! GET    /health
//! GET    /api/models                     POST /api/models
//! GET    /api/models/{name}              DELETE /api/models/{name}
//! GET    /api/models/{name}/definition
//! POST   /api/schemas/validate
//! GET    /api/collections
//! GET    /api/collections/{name}         POST /api/collections/{name}
//! GET    /api/collections/{name}/{id}    PUT, DELETE /api/collections/{name}/{id}
//! ```

use super::handlers::{collections, models, schemas};
use super::response::{self, HttpResponse};
use crate::db::ModelTable;
use crate::error::{Result, StudioError};
use crate::store::ModelStore;
use http::{Method, StatusCode};
use std::borrow::Cow;
use std::sync::Arc;

/// Everything a request handler can reach.
pub struct AppState {
    pub store: ModelStore,
    pub database: Arc<dyn ModelTable>,
    pub max_body_size: usize,
}

impl AppState {
    pub fn new(store: ModelStore, database: Arc<dyn ModelTable>, max_body_size: usize) -> Self {
        Self { store, database, max_body_size }
    }

    /// Dispatch one request. Never fails: errors become JSON error responses.
    pub async fn route(
        &self,
        method: &Method,
        path: &str,
        query: Option<&str>,
        body: &[u8],
    ) -> HttpResponse {
        match self.dispatch(method, path, query, body).await {
            Ok(resp) => resp,
            Err(err) => {
                if err.status().is_server_error() {
                    log::error!("{} {} failed: {}", method, path, err);
                }
                response::error(&err)
            }
        }
    }

    async fn dispatch(
        &self,
        method: &Method,
        path: &str,
        query: Option<&str>,
        body: &[u8],
    ) -> Result<HttpResponse> {
        if body.len() > self.max_body_size {
            return Err(StudioError::PayloadTooLarge(self.max_body_size));
        }
        if *method == Method::OPTIONS {
            return Ok(response::empty(StatusCode::NO_CONTENT));
        }

        let segments: Vec<Cow<'_, str>> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| urlencoding::decode(s).unwrap_or(Cow::Borrowed(s)))
            .collect();
        let segments: Vec<&str> = segments.iter().map(|s| s.as_ref()).collect();

        match (method, segments.as_slice()) {
            (&Method::GET, ["health"]) => Ok(health()),

            (&Method::GET, ["api", "models"]) => models::list(self).await,
            (&Method::POST, ["api", "models"]) => {
                models::create(self, &response::parse_body(body)?).await
            }
            (&Method::GET, ["api", "models", name]) => models::source(self, name).await,
            (&Method::GET, ["api", "models", name, "definition"]) => {
                models::definition(self, name).await
            }
            (&Method::DELETE, ["api", "models", name]) => models::delete(self, name).await,

            (&Method::POST, ["api", "schemas", "validate"]) => {
                Ok(schemas::validate(&response::parse_body(body)?))
            }

            (&Method::GET, ["api", "collections"]) => collections::names(self).await,
            (&Method::GET, ["api", "collections", name]) => {
                collections::list(self, name, query).await
            }
            (&Method::POST, ["api", "collections", name]) => {
                collections::insert(self, name, &response::parse_body(body)?).await
            }
            (&Method::GET, ["api", "collections", name, id]) => {
                collections::get(self, name, id).await
            }
            (&Method::PUT, ["api", "collections", name, id]) => {
                collections::update(self, name, id, &response::parse_body(body)?).await
            }
            (&Method::DELETE, ["api", "collections", name, id]) => {
                collections::delete(self, name, id).await
            }

            _ => Err(StudioError::NotFound(format!("Route {} {} not found", method, path))),
        }
    }
}

fn health() -> HttpResponse {
    response::json(
        StatusCode::OK,
        &serde_json::json!({ "status": "ok", "timestamp": chrono::Utc::now().to_rfc3339() }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryDatabase;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};

    fn state(root: &std::path::Path) -> AppState {
        AppState::new(ModelStore::new(root), Arc::new(MemoryDatabase::new()), 1024)
    }

    async fn call(state: &AppState, method: Method, path: &str, body: Value) -> (StatusCode, Value) {
        let body = if body.is_null() { Vec::new() } else { body.to_string().into_bytes() };
        let resp = state.route(&method, path, None, &body).await;
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let tmp = tempfile::tempdir().unwrap();
        let (status, body) = call(&state(tmp.path()), Method::GET, "/health", Value::Null).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let tmp = tempfile::tempdir().unwrap();
        let (status, body) = call(&state(tmp.path()), Method::PATCH, "/api/models", Value::Null).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], "fail");
        assert_eq!(body["message"], "Route PATCH /api/models not found");
    }

    #[tokio::test]
    async fn test_preflight() {
        let tmp = tempfile::tempdir().unwrap();
        let (status, _) = call(&state(tmp.path()), Method::OPTIONS, "/api/models", Value::Null).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_oversized_body() {
        let tmp = tempfile::tempdir().unwrap();
        let state = state(tmp.path());
        let body = vec![b' '; 2048];
        let resp = state.route(&Method::POST, "/api/schemas/validate", None, &body).await;
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let tmp = tempfile::tempdir().unwrap();
        let state = state(tmp.path());
        let resp = state.route(&Method::POST, "/api/models", None, b"{name:").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_percent_encoded_segments() {
        let tmp = tempfile::tempdir().unwrap();
        let state = state(tmp.path());
        let (status, body) = call(&state, Method::GET, "/api/models/No%20Such", Value::Null).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Model No Such not found");
    }

    #[tokio::test]
    async fn test_validate_endpoint() {
        let tmp = tempfile::tempdir().unwrap();
        let (status, body) = call(
            &state(tmp.path()),
            Method::POST,
            "/api/schemas/validate",
            json!({ "schema": { "password": { "type": "string" }, "role": { "type": "strng" } } }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isValid"], false);
        let errors = body["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].as_str().unwrap().contains("role"));
    }
}
