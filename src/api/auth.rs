//! API key check
//!
//! The key is read from the `X-API-Key` header, falling back to the
//! `api_key` query parameter, and must equal the configured key exactly.

use std::collections::HashMap;

use axum::extract::{Query, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::BlogError;

use super::AppState;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Query parameter carrying the API key
const API_KEY_PARAM: &str = "api_key";

pub(super) async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if state.config.debug {
        return next.run(request).await;
    }

    let presented = presented_key(&request);
    let authorized = match (presented.as_deref(), state.config.api_key.as_deref()) {
        (Some(presented), Some(expected)) => presented == expected,
        _ => false,
    };

    if !authorized {
        tracing::warn!(
            "Rejected {} {}: invalid or missing API key",
            request.method(),
            request.uri().path()
        );
        return BlogError::Unauthorized.into_response();
    }

    next.run(request).await
}

fn presented_key(request: &Request) -> Option<String> {
    let from_header = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    from_header.or_else(|| {
        Query::<HashMap<String, String>>::try_from_uri(request.uri())
            .ok()
            .and_then(|Query(mut params)| params.remove(API_KEY_PARAM))
            .filter(|value| !value.is_empty())
    })
}
