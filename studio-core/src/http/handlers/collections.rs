use crate::db::{Collection, DEFAULT_PAGE_SIZE};
use crate::error::{Result, StudioError};
use crate::http::response::{self, HttpResponse};
use crate::http::AppState;
use http::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /api/collections
pub async fn names(state: &AppState) -> Result<HttpResponse> {
    Ok(response::json(StatusCode::OK, &state.database.names().await))
}

/// GET /api/collections/{name}?page=&limit=
pub async fn list(state: &AppState, name: &str, query: Option<&str>) -> Result<HttpResponse> {
    let collection = lookup(state, name).await?;
    let page = query_param(query, "page").unwrap_or(1);
    let limit = query_param(query, "limit").unwrap_or(DEFAULT_PAGE_SIZE);
    Ok(response::json(StatusCode::OK, &collection.list(page, limit).await))
}

/// POST /api/collections/{name}
pub async fn insert(state: &AppState, name: &str, body: &Value) -> Result<HttpResponse> {
    let doc = lookup(state, name).await?.insert(body).await?;
    Ok(response::json(StatusCode::CREATED, &doc))
}

/// GET /api/collections/{name}/{id}
pub async fn get(state: &AppState, name: &str, id: &str) -> Result<HttpResponse> {
    let doc = lookup(state, name).await?.get(id).await.ok_or_else(|| {
        StudioError::NotFound(format!("Document {} not found in {}", id, name))
    })?;
    Ok(response::json(StatusCode::OK, &doc))
}

/// PUT /api/collections/{name}/{id}
pub async fn update(state: &AppState, name: &str, id: &str, body: &Value) -> Result<HttpResponse> {
    let doc = lookup(state, name).await?.update(id, body).await?;
    Ok(response::json(StatusCode::OK, &doc))
}

/// DELETE /api/collections/{name}/{id}
pub async fn delete(state: &AppState, name: &str, id: &str) -> Result<HttpResponse> {
    lookup(state, name).await?.delete(id).await?;
    Ok(response::json(
        StatusCode::OK,
        &json!({ "message": format!("Document {} deleted successfully", id) }),
    ))
}

async fn lookup(state: &AppState, name: &str) -> Result<Arc<Collection>> {
    state
        .database
        .collection(name)
        .await
        .ok_or_else(|| StudioError::NotFound(format!("Collection {} not found", name)))
}

/// First value of `key` in a query string that parses as a number.
fn query_param(query: Option<&str>, key: &str) -> Option<usize> {
    query?
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| urlencoding::decode(k).map(|k| k == key).unwrap_or(false))
        .and_then(|(_, v)| v.trim().parse().ok())
}
