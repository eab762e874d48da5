//! Response helpers shared by the router and the connection layer.

use crate::error::StudioError;
use bytes::Bytes;
use http::StatusCode;
use http_body_util::Full;
use hyper::Response;
use serde::Serialize;
use serde_json::{json, Value};

pub type HttpResponse = Response<Full<Bytes>>;

/// JSON response with the given status code.
pub fn json(status: StatusCode, body: &impl Serialize) -> HttpResponse {
    match serde_json::to_vec(body) {
        Ok(bytes) => Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Full::new(Bytes::from(bytes)))
            .expect("valid HTTP response"),
        Err(e) => error(&StudioError::Json(e)),
    }
}

/// Empty-body response with the given status code.
pub fn empty(status: StatusCode) -> HttpResponse {
    Response::builder()
        .status(status)
        .body(Full::new(Bytes::new()))
        .expect("valid HTTP response")
}

/// Uniform error body:
/// ```json
/// { "status": "fail", "message": "...", "errors": ["..."] }
/// ```
/// `status` is `fail` for client errors and `error` for server errors;
/// `errors` only appears for validation failures.
pub fn error(err: &StudioError) -> HttpResponse {
    let status = err.status();
    let mut body = json!({
        "status": if status.is_server_error() { "error" } else { "fail" },
        "message": err.to_string(),
    });
    if let StudioError::Validation(errors) = err {
        body["errors"] = json!(errors);
    }

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .expect("valid HTTP response")
}

/// Parse a request body. An empty body reads as `{}`.
pub fn parse_body(body: &[u8]) -> Result<Value, StudioError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(body).map_err(|_| StudioError::BadRequest("Invalid JSON format".into()))
}
