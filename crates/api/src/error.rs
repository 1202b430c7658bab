//! API error types
//!
//! External detail policy: validation failures carry their specific reason,
//! every authentication failure collapses to one generic message (the
//! specific cause is logged, never returned), and internal failures return
//! a fixed message with detail kept server-side.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use switchdesk_shared::StoreError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by route handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Input failed validation (password policy, empty fields)
    #[error("{0}")]
    Validation(String),

    /// Credential check failed. One message for every cause so callers
    /// cannot probe which usernames exist.
    #[error("invalid credentials")]
    AuthenticationFailed,

    /// A uniqueness rule was violated
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    /// Unexpected server-side failure; detail stays in the log
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            ApiError::AuthenticationFailed => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            ApiError::Conflict(message) => (StatusCode::CONFLICT, message.clone()),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message.clone()),
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": message,
            "code": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername(name) => {
                ApiError::Conflict(format!("account already exists: {name}"))
            }
            StoreError::NotFound(_) => ApiError::NotFound("user not found".to_string()),
        }
    }
}
