//! Post record
//!
//! Serialized field order is `id, title, content, author, date`, matching
//! the layout of the storage file.

use serde::{Deserialize, Serialize};

use super::{PostField, PostId};

/// A blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author: String,
    pub date: String,
}

impl Post {
    /// Build a post from a validated create payload
    pub fn from_new(id: PostId, new: NewPost) -> Self {
        Self {
            id,
            title: new.title,
            content: new.content,
            author: new.author,
            date: new.date,
        }
    }

    /// Borrow a string field by name
    pub fn field(&self, field: PostField) -> &str {
        match field {
            PostField::Title => &self.title,
            PostField::Content => &self.content,
            PostField::Author => &self.author,
            PostField::Date => &self.date,
        }
    }

    /// Overwrite the fields present in `patch`, keep the rest
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
    }
}

/// Validated payload for creating a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: String,
    pub date: String,
}

/// Validated partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
}

impl PostPatch {
    /// True when the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.author.is_none() && self.date.is_none()
    }

    /// Set one field by name
    pub fn set(&mut self, field: PostField, value: String) {
        let slot = match field {
            PostField::Title => &mut self.title,
            PostField::Content => &mut self.content,
            PostField::Author => &mut self.author,
            PostField::Date => &mut self.date,
        };
        *slot = Some(value);
    }
}
