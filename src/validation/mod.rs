//! Validation Module
//!
//! Turns an untyped JSON request body into a typed `NewPost` or
//! `PostPatch`, or a per-field error report.
//!
//! ## Rules
//! - The body must be a JSON object
//! - Create requires title, content, author and date
//! - Every supplied field must be a string that is non-empty after trimming
//! - Unknown keys (including `id`) are rejected
//! - Accepted values are stored trimmed; `date` is not parsed further
//!
//! All fields are checked before failing, so a single response lists every
//! problem.

mod payload;

pub use payload::{validate_create, validate_update};

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Messages reported by the validator
pub mod messages {
    pub const MISSING: &str = "Missing data for required field.";
    pub const NOT_A_STRING: &str = "Not a valid string.";
    pub const EMPTY: &str = "Field may not be empty.";
    pub const UNKNOWN: &str = "Unknown field.";
    pub const INVALID_INPUT: &str = "Invalid input type.";
}

/// Key used for errors about the payload as a whole
pub const SCHEMA_KEY: &str = "_schema";

/// Field name to list of problems, ordered by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem with `field`
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Messages recorded for `field`
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// `Ok(value)` when nothing was recorded, otherwise `Err(self)`
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, problems) in &self.fields {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{}: {}", field, problems.join(" "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
