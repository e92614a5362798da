//! Error responses
//!
//! Client errors render as `{"error": "<reason>", "message": "<detail>"}`;
//! validation failures render as `{"error": {"<field>": ["<problem>", ...]}}`.
//! Server errors are logged and rendered without any detail.

use std::any::Any;

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::BlogError;

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if !self.is_client_error() {
            tracing::error!("Request failed: {}", self);
            return error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred.",
            );
        }

        match self {
            BlogError::Validation(errors) => {
                (status, Json(json!({ "error": errors }))).into_response()
            }
            other => {
                let mut response = error_body(status, &other.to_string());
                if let BlogError::RateLimited { retry_after_secs } = other {
                    if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
                        response.headers_mut().insert(header::RETRY_AFTER, value);
                    }
                }
                response
            }
        }
    }
}

/// Response for a request whose handler panicked
pub(crate) fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("<non-string panic payload>");
    tracing::error!("Handler panicked: {}", detail);

    error_body(
        StatusCode::INTERNAL_SERVER_ERROR,
        "An unexpected error occurred.",
    )
}

/// `{"error": <reason phrase>, "message": <message>}` with `status`
pub(crate) fn error_body(status: StatusCode, message: &str) -> Response {
    let reason = status.canonical_reason().unwrap_or("Error");
    (status, Json(json!({ "error": reason, "message": message }))).into_response()
}
