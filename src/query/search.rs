//! Substring search
//!
//! Matching is case-insensitive. Per-field filters are ANDed together; the
//! free-text `query` matches when any of the four fields contains it.

use crate::model::{Post, PostField};

/// Search criteria, stored lower-cased
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    query: Option<String>,
    fields: Vec<(PostField, String)>,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match `term` against every field
    pub fn query(mut self, term: &str) -> Self {
        self.query = normalize(term);
        self
    }

    /// Match `term` against `field` only
    pub fn field(mut self, field: PostField, term: &str) -> Self {
        self.fields.retain(|(f, _)| *f != field);
        if let Some(term) = normalize(term) {
            self.fields.push((field, term));
        }
        self
    }

    /// True when no criterion was given (everything matches)
    pub fn is_empty(&self) -> bool {
        self.query.is_none() && self.fields.is_empty()
    }

    pub fn matches(&self, post: &Post) -> bool {
        if let Some(query) = &self.query {
            let hit = PostField::ALL
                .iter()
                .any(|&field| contains_ignore_case(post.field(field), query));
            if !hit {
                return false;
            }
        }

        self.fields
            .iter()
            .all(|(field, term)| contains_ignore_case(post.field(*field), term))
    }
}

fn normalize(term: &str) -> Option<String> {
    let term = term.trim();
    if term.is_empty() {
        None
    } else {
        Some(term.to_lowercase())
    }
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Posts matching `filter`, in store order
pub fn search_posts(posts: &[Post], filter: &SearchFilter) -> Vec<Post> {
    posts
        .iter()
        .filter(|post| filter.matches(post))
        .cloned()
        .collect()
}
