use std::any::Any;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use payroll_core::ValidationResult;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Application-level error type.
/// Implements `IntoResponse` so handlers can return `Result<T, ApiError>`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

impl From<ValidationResult> for ApiError {
    fn from(result: ValidationResult) -> Self {
        ApiError::Validation(result.into_messages())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(messages) => {
                tracing::debug!(?messages, "rejected request");
                let body = Json(json!({
                    "code": "VALIDATION_ERROR",
                    "messages": messages,
                }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}

/// Turns a handler panic into a 500 with the usual error body.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(detail, "handler panicked");

    let body = Json(json!({
        "code": "INTERNAL_ERROR",
        "messages": ["Internal server error"],
    }));
    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}
