//! Route handlers
//!
//! Each handler parses its inputs into typed values, calls the store or the
//! query engine, and shapes the JSON response. Failures are returned as
//! `BlogError` and rendered by its `IntoResponse` impl.

use std::collections::HashMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::Json;
use serde_json::{json, Value};

use crate::error::{BlogError, Result};
use crate::model::{Post, PostField, PostId};
use crate::query::{self, Page, PageRequest, SearchFilter, SortSpec};
use crate::validation::{validate_create, validate_update};

use super::openapi::openapi_document;
use super::AppState;

type Params = HashMap<String, String>;

// =============================================================================
// Posts
// =============================================================================

pub(super) async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<Params>,
) -> Result<Json<Page>> {
    let page = parse_count(&params, "page", PageRequest::DEFAULT_PAGE)?;
    let per_page = parse_count(&params, "per_page", state.config.default_per_page.max(1))?;
    let request = PageRequest::new(page, per_page)?;

    let sort = SortSpec::parse(
        params.get("sort").map(String::as_str),
        params.get("direction").map(String::as_str),
    )?;

    let page = state
        .store
        .with_posts(|posts| query::list_page(posts, sort, request));

    tracing::debug!(
        "Listed page {} of {} ({} posts)",
        page.page,
        page.total_pages,
        page.posts.len()
    );
    Ok(Json(page))
}

pub(super) async fn get_post(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Post>> {
    let id = parse_id(&raw_id)?;
    tracing::info!("Fetching post with ID: {}", id);

    match state.store.get(id) {
        Some(post) => Ok(Json(post)),
        None => {
            tracing::warn!("Post with ID {} not found.", id);
            Err(BlogError::PostNotFound(id))
        }
    }
}

pub(super) async fn create_post(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Post>)> {
    let Json(payload) = body.map_err(body_error)?;
    let new = validate_create(&payload)?;

    let post = state.store.create(new)?;
    tracing::info!("Created post {}", post.id);

    Ok((StatusCode::CREATED, Json(post)))
}

pub(super) async fn update_post(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<Post>> {
    let id = parse_id(&raw_id)?;
    let Json(payload) = body.map_err(body_error)?;
    let patch = validate_update(&payload)?;

    match state.store.update(id, patch)? {
        Some(post) => {
            tracing::info!("Updated post {}", id);
            Ok(Json(post))
        }
        None => Err(BlogError::PostNotFound(id)),
    }
}

pub(super) async fn delete_post(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>> {
    let id = parse_id(&raw_id)?;

    if !state.store.delete(id)? {
        return Err(BlogError::PostNotFound(id));
    }

    tracing::info!("Deleted post {}", id);
    Ok(Json(json!({
        "message": format!("Post with id {} deleted successfully.", id)
    })))
}

pub(super) async fn search_posts(
    State(state): State<AppState>,
    Query(params): Query<Params>,
) -> Json<Vec<Post>> {
    let mut filter = SearchFilter::new();
    if let Some(term) = params.get("query") {
        filter = filter.query(term);
    }
    for field in PostField::ALL {
        if let Some(term) = params.get(field.as_str()) {
            filter = filter.field(field, term);
        }
    }

    let results = state
        .store
        .with_posts(|posts| query::search_posts(posts, &filter));

    tracing::debug!("Search matched {} posts", results.len());
    Json(results)
}

// =============================================================================
// Documentation / Fallback
// =============================================================================

pub(super) async fn swagger_json() -> Json<Value> {
    Json(openapi_document())
}

pub(super) async fn fallback(uri: Uri) -> BlogError {
    BlogError::RouteNotFound(uri.path().to_string())
}

// =============================================================================
// Input Parsing
// =============================================================================

/// Ids that are not unsigned integers can't name a post
fn parse_id(raw: &str) -> Result<PostId> {
    raw.parse::<PostId>()
        .map_err(|_| BlogError::RouteNotFound(format!("/posts/{}", raw)))
}

/// Parse an optional non-negative integer parameter
fn parse_count(params: &Params, name: &str, default: usize) -> Result<usize> {
    match params.get(name).map(|raw| raw.trim()) {
        None | Some("") => Ok(default),
        Some(raw) => raw.parse::<usize>().map_err(|_| {
            BlogError::InvalidParameter(format!(
                "Invalid {} parameter: expected a positive integer, got {:?}",
                name, raw
            ))
        }),
    }
}

fn body_error(rejection: JsonRejection) -> BlogError {
    BlogError::InvalidParameter(format!("Invalid JSON body: {}", rejection.body_text()))
}
