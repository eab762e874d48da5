//! Error taxonomy shared by the validator, generator, store and HTTP layer.

use http::StatusCode;
use std::path::PathBuf;

/// Crate result type
pub type Result<T> = std::result::Result<T, StudioError>;

/// Everything that can abort a Mongo Studio operation.
///
/// Validation problems are collected exhaustively into a single
/// [`StudioError::Validation`]; every other variant aborts immediately.
#[derive(thiserror::Error, Debug)]
pub enum StudioError {
    #[error("Schema validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Request body exceeds {0} bytes")]
    PayloadTooLarge(usize),

    #[error("Store error at {}: {source}", path.display())]
    Store {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Generation error: {0}")]
    Generation(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StudioError {
    pub fn store(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StudioError::Store { path: path.into(), source }
    }

    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            StudioError::Validation(_)
            | StudioError::BadRequest(_)
            | StudioError::Conflict(_)
            | StudioError::Json(_) => StatusCode::BAD_REQUEST,
            StudioError::NotFound(_) => StatusCode::NOT_FOUND,
            StudioError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            StudioError::Store { .. } | StudioError::Generation(_) | StudioError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// True for failures the caller can fix by changing the request.
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }

    /// Individual messages for a validation failure, empty otherwise.
    pub fn validation_errors(&self) -> &[String] {
        match self {
            StudioError::Validation(errors) => errors,
            _ => &[],
        }
    }
}
