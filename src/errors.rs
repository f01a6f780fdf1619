use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde_json::json;
use thiserror::Error;

#[derive(Debug)]
pub struct DBError {
    not_found: bool,
}

impl DBError {
    pub fn new() -> Self {
        DBError { not_found: false }
    }

    pub fn not_found() -> Self {
        DBError { not_found: true }
    }

    pub fn is_not_found(&self) -> bool {
        self.not_found
    }
}

impl From<DBError> for StatusCode {
    fn from(e: DBError) -> Self {
        if e.not_found {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("telegram api request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("telegram api rejected the request: {0}")]
    Api(String),
}

/// Error surfaced by the JSON API: a status code plus the
/// `{"success": false, "error": ...}` envelope the frontend expects.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    }
}

impl From<DBError> for ApiError {
    fn from(e: DBError) -> Self {
        if e.is_not_found() {
            ApiError::not_found("Post not found")
        } else {
            ApiError::internal()
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({ "success": false, "error": self.message })),
        )
            .into_response()
    }
}
