use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use shared::Error;

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// HTTP projection of the cache-access error taxonomy: validation failures
/// and unreadable bodies are client errors, a missing key is 404, and any
/// backend failure is 500 with the detail preserved so callers can decide
/// whether to retry.
#[derive(Debug)]
pub enum ApiError {
    Cache(Error),
    /// Request body did not deserialize; boundary-only, never reaches the service.
    InvalidBody(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self::Cache(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Cache(err) => {
                let status = match &err {
                    Error::MissingParameter { .. } | Error::InvalidTtlFormat => {
                        StatusCode::BAD_REQUEST
                    }
                    Error::NotFound => StatusCode::NOT_FOUND,
                    Error::BackendUnavailable(detail) => {
                        tracing::error!(error = %detail, "backend failure");
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, err.to_string())
            }
            ApiError::InvalidBody(detail) => (StatusCode::BAD_REQUEST, detail),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
