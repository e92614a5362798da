//! Page slicing
//!
//! Page `p` of size `n` is the half-open range `[(p-1)*n, p*n)`. Pages past
//! the end are empty rather than an error.

use std::borrow::Borrow;

use serde::Serialize;

use crate::error::{BlogError, Result};
use crate::model::Post;

/// Requested page, both values at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    per_page: usize,
}

impl PageRequest {
    pub const DEFAULT_PAGE: usize = 1;
    pub const DEFAULT_PER_PAGE: usize = 5;

    pub fn new(page: usize, per_page: usize) -> Result<Self> {
        if page == 0 {
            return Err(BlogError::InvalidParameter(
                "Invalid page number. Must be at least 1.".to_string(),
            ));
        }
        if per_page == 0 {
            return Err(BlogError::InvalidParameter(
                "Invalid per_page value. Must be at least 1.".to_string(),
            ));
        }
        Ok(Self { page, per_page })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Index of the first item on this page (saturating)
    fn start(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            per_page: Self::DEFAULT_PER_PAGE,
        }
    }
}

/// One page of posts plus totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub page: usize,
    pub per_page: usize,
    pub total_posts: usize,
    pub total_pages: usize,
    pub posts: Vec<Post>,
}

/// Cut `request`'s page out of `posts`
pub fn paginate<P: Borrow<Post>>(posts: &[P], request: PageRequest) -> Page {
    let total_posts = posts.len();
    let total_pages = total_posts.div_ceil(request.per_page);

    let start = request.start().min(total_posts);
    let end = start.saturating_add(request.per_page).min(total_posts);

    Page {
        page: request.page,
        per_page: request.per_page,
        total_posts,
        total_pages,
        posts: posts[start..end]
            .iter()
            .map(|p| Borrow::<Post>::borrow(p).clone())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_saturates() {
        let request = PageRequest::new(usize::MAX, usize::MAX).unwrap();

        assert_eq!(request.start(), usize::MAX);
    }

    #[test]
    fn test_zero_values_rejected() {
        assert!(PageRequest::new(0, 5).is_err());
        assert!(PageRequest::new(1, 0).is_err());
    }
}
