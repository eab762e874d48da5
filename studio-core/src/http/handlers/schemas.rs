use crate::http::response::{self, HttpResponse};
use crate::schema::validate_schema;
use http::StatusCode;
use serde_json::Value;

/// POST /api/schemas/validate
///
/// A missing or non-object `schema` is reported in the body, not as an HTTP error.
pub fn validate(body: &Value) -> HttpResponse {
    let schema = body.get("schema").unwrap_or(&Value::Null);
    response::json(StatusCode::OK, &validate_schema(schema))
}
