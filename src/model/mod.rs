//! Model Module
//!
//! The post record and the typed inputs that create or change it.
//!
//! ## Field Access
//! Sorting and per-field search both address a post's string fields by
//! name; `PostField` is the closed set of those names.

mod post;

pub use post::{NewPost, Post, PostPatch};

use std::fmt;
use std::str::FromStr;

/// Identifier assigned to a post by the store
pub type PostId = u64;

/// The string fields of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostField {
    Title,
    Content,
    Author,
    Date,
}

impl PostField {
    /// All fields, in serialization order
    pub const ALL: [PostField; 4] = [
        PostField::Title,
        PostField::Content,
        PostField::Author,
        PostField::Date,
    ];

    /// Field name as it appears in JSON and query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            PostField::Title => "title",
            PostField::Content => "content",
            PostField::Author => "author",
            PostField::Date => "date",
        }
    }
}

impl fmt::Display for PostField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostField {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "title" => Ok(PostField::Title),
            "content" => Ok(PostField::Content),
            "author" => Ok(PostField::Author),
            "date" => Ok(PostField::Date),
            _ => Err(()),
        }
    }
}
