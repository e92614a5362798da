//! Field sorting
//!
//! Sorting is stable in both directions: posts with equal keys keep their
//! store order whether the direction is ascending or descending.

use std::borrow::Borrow;
use std::str::FromStr;

use crate::error::{BlogError, Result};
use crate::model::{Post, PostField};

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(()),
        }
    }
}

/// Field plus direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: PostField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: PostField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Parse raw `sort` / `direction` query values
    ///
    /// Both are trimmed and lower-cased; empty counts as absent. Returns
    /// `None` when no sort field is given. The direction is validated even
    /// then.
    pub fn parse(sort: Option<&str>, direction: Option<&str>) -> Result<Option<Self>> {
        let sort = normalize(sort);
        let direction = normalize(direction);

        let field = match sort.as_deref() {
            None => None,
            Some(raw) => Some(
                raw.parse::<PostField>()
                    .map_err(|_| BlogError::InvalidParameter("Invalid sort field".to_string()))?,
            ),
        };

        let direction = match direction.as_deref() {
            None => SortDirection::default(),
            Some(raw) => raw.parse::<SortDirection>().map_err(|_| {
                BlogError::InvalidParameter("Invalid sort direction".to_string())
            })?,
        };

        Ok(field.map(|field| Self::new(field, direction)))
    }
}

fn normalize(raw: Option<&str>) -> Option<String> {
    raw.map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty())
}

/// Stable sort of `posts` by `spec`
pub fn sort_posts<P: Borrow<Post>>(posts: &mut [P], spec: SortSpec) {
    let field = spec.field;
    match spec.direction {
        SortDirection::Asc => posts.sort_by(|a, b| key(a, field).cmp(key(b, field))),
        SortDirection::Desc => posts.sort_by(|a, b| key(b, field).cmp(key(a, field))),
    }
}

fn key<P: Borrow<Post>>(post: &P, field: PostField) -> &str {
    Borrow::<Post>::borrow(post).field(field)
}
