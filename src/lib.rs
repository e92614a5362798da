//! # Masterblog
//!
//! A small blog API with:
//! - JSON-file persistence, rewritten after every mutation
//! - Payload validation with per-field error reports
//! - Pagination, field sorting and substring search
//! - API-key authentication and per-client rate limiting
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      HTTP Server (axum)                      │
//! │          trace → CORS → API key → rate limit → route         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┼─────────────────────┐
//!          │ (writes)   │ (reads)             │ (list / search)
//!          ▼            │                     ▼
//!   ┌─────────────┐     │              ┌─────────────┐
//!   │  Validator  │     │              │   Query     │
//!   │ (typed DTO) │     │              │   Engine    │
//!   └──────┬──────┘     │              └──────▲──────┘
//!          │            │                     │ snapshot
//!          ▼            ▼                     │
//!   ┌─────────────────────────────────────────┴───┐
//!   │                 Post Store                   │
//!   │      (RwLock<Vec<Post>>, single writer)      │
//!   └─────────────────────┬───────────────────────┘
//!                         ▼
//!                 posts_storage.json
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod model;
pub mod validation;
pub mod store;
pub mod query;
pub mod api;
pub mod seed;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BlogError, Result};
pub use config::Config;
pub use model::{NewPost, Post, PostField, PostId, PostPatch};
pub use store::PostStore;
pub use api::{build_router, AppState};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of Masterblog
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
