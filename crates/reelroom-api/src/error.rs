//! API boundary error mapping.
//!
//! Repository, gateway, and queue errors propagate as typed values to this
//! boundary instead of being swallowed and logged into nulls, so "no data"
//! and "fetch failed" stay distinguishable to the caller. The one
//! exception by contract is the chat turn, which collapses every internal
//! failure into the single user-facing generation error.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracing::error;

use reelroom_core::Error;

#[derive(Debug)]
pub enum ApiError {
    /// Upstream or storage failure; detail is logged, not leaked.
    Internal(Error),
    Unauthorized(String),
    NotFound(String),
    BadRequest(String),
    /// The chat turn failed; the user's own message was still saved.
    Generation,
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            Error::Unauthorized(msg) => ApiError::Unauthorized(msg),
            Error::Generation => ApiError::Generation,
            other => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Internal(err) => {
                error!(subsystem = "api", error = %err, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Generation => (
                StatusCode::BAD_GATEWAY,
                Error::Generation.to_string(),
            ),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
