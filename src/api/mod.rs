//! API Module
//!
//! HTTP surface of the blog, built on axum.
//!
//! ## Request Pipeline
//! ```text
//! TraceLayer → CORS → panic guard → API key check → rate limit → handler
//! ```
//! Requests that fail authentication are rejected before they count against
//! the caller's rate-limit budget. A panic anywhere below the guard becomes
//! a generic 500.
//!
//! ## Routes (under `/api/v1`)
//! - `GET    /posts`         paginated, optionally sorted listing
//! - `POST   /posts`         create
//! - `GET    /posts/search`  substring search
//! - `GET    /posts/:id`     fetch one
//! - `PUT    /posts/:id`     partial update
//! - `DELETE /posts/:id`     delete
//!
//! `GET /swagger.json` serves the OpenAPI description.

mod auth;
mod handlers;
mod openapi;
mod rate_limit;
mod response;

pub use auth::API_KEY_HEADER;
pub use openapi::openapi_document;
pub use rate_limit::RateLimiter;

use std::sync::Arc;

use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::store::PostStore;

/// Base path of the versioned API
pub const API_PREFIX: &str = "/api/v1";

/// Shared state handed to every handler and middleware
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PostStore>,
    pub config: Arc<Config>,
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<PostStore>) -> Self {
        let limiter = Arc::new(RateLimiter::per_minute(config.rate_limit_per_minute));
        Self {
            store,
            config: Arc::new(config),
            limiter,
        }
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let posts = Router::new()
        .route("/posts", get(handlers::list_posts).post(handlers::create_post))
        .route("/posts/search", get(handlers::search_posts))
        .route(
            "/posts/:id",
            get(handlers::get_post)
                .put(handlers::update_post)
                .delete(handlers::delete_post),
        );

    Router::new()
        .nest(API_PREFIX, posts)
        .route("/swagger.json", get(handlers::swagger_json))
        .fallback(handlers::fallback)
        .layer(from_fn_with_state(state.clone(), rate_limit::enforce_rate_limit))
        .layer(from_fn_with_state(state.clone(), auth::require_api_key))
        .layer(CatchPanicLayer::custom(response::panic_response))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
