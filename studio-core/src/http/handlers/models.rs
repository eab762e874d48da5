use crate::error::{Result, StudioError};
use crate::http::response::{self, HttpResponse};
use crate::http::AppState;
use crate::schema::{validate_model_name, ModelSchema};
use http::StatusCode;
use serde_json::{json, Value};

/// GET /api/models
pub async fn list(state: &AppState) -> Result<HttpResponse> {
    let models = state.store.list().await?;
    Ok(response::json(StatusCode::OK, &models))
}

/// POST /api/models
///
/// The name is reserved in the model table before the artifact is written,
/// and released again if the write fails.
pub async fn create(state: &AppState, body: &Value) -> Result<HttpResponse> {
    let (name, raw_schema) = match (field(body, "name"), field(body, "schema")) {
        (Some(name), Some(schema)) => (name, schema),
        _ => return Err(StudioError::BadRequest("Model name and schema are required".into())),
    };
    let name = match name.as_str() {
        Some(name) if !name.trim().is_empty() => name,
        _ => {
            return Err(StudioError::BadRequest("Model name must be a non-empty string".into()))
        }
    };
    if !raw_schema.is_object() {
        return Err(StudioError::BadRequest("Schema must be a valid object".into()));
    }

    validate_model_name(name)?;
    let schema = ModelSchema::from_json(raw_schema)?;

    if !state.database.register(name, schema.clone()).await {
        return Err(StudioError::Conflict(format!("Model {} already exists", name)));
    }

    let path = match state.store.save(name, &schema).await {
        Ok(path) => path,
        Err(e) => {
            state.database.unregister(name).await;
            return Err(e);
        }
    };

    log::info!("Created model '{}' with {} field(s)", name, schema.len());
    Ok(response::json(
        StatusCode::CREATED,
        &json!({
            "message": format!("Model {} created successfully", name),
            "modelPath": path.display().to_string(),
            "name": name,
        }),
    ))
}

/// GET /api/models/{name}
pub async fn source(state: &AppState, name: &str) -> Result<HttpResponse> {
    let model = read(state, name).await?;
    Ok(response::json(StatusCode::OK, &json!({ "name": name, "model": model })))
}

/// GET /api/models/{name}/definition
pub async fn definition(state: &AppState, name: &str) -> Result<HttpResponse> {
    let definition = read(state, name).await?;
    Ok(response::json(StatusCode::OK, &json!({ "name": name, "definition": definition })))
}

/// DELETE /api/models/{name}
pub async fn delete(state: &AppState, name: &str) -> Result<HttpResponse> {
    if !state.store.delete(name).await? {
        return Err(not_found(name));
    }
    state.database.unregister(name).await;

    log::info!("Deleted model '{}'", name);
    Ok(response::json(
        StatusCode::OK,
        &json!({ "message": format!("Model {} deleted successfully", name) }),
    ))
}

async fn read(state: &AppState, name: &str) -> Result<String> {
    state.store.get(name).await?.ok_or_else(|| not_found(name))
}

fn not_found(name: &str) -> StudioError {
    StudioError::NotFound(format!("Model {} not found", name))
}

/// Present and not null.
fn field<'a>(body: &'a Value, key: &str) -> Option<&'a Value> {
    body.get(key).filter(|v| !v.is_null())
}
