//! Store Module
//!
//! Owns the canonical collection of posts, in memory and on disk.
//!
//! ## On-disk Layout
//! A single JSON file holding an array of post objects in insertion order:
//! ```text
//! [
//!   { "id": 1, "title": "...", "content": "...", "author": "...", "date": "2025-02-18" },
//!   ...
//! ]
//! ```
//!
//! ## Persistence
//! Every mutation rewrites the whole file. The new contents go to a sibling
//! `*.tmp` file which is then renamed over the original, so a reader never
//! sees a half-written array.

mod post_store;

pub use post_store::PostStore;
