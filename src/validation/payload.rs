//! Payload validation for create and update requests

use serde_json::{Map, Value};

use crate::model::{NewPost, PostField, PostPatch};

use super::{messages, ValidationErrors, SCHEMA_KEY};

/// Validate a create payload
pub fn validate_create(payload: &Value) -> Result<NewPost, ValidationErrors> {
    let patch = validate_fields(payload, true)?;

    // validate_fields with `required` reports every absent field, so all
    // four are present here.
    match (patch.title, patch.content, patch.author, patch.date) {
        (Some(title), Some(content), Some(author), Some(date)) => Ok(NewPost {
            title,
            content,
            author,
            date,
        }),
        _ => {
            let mut errors = ValidationErrors::new();
            errors.add(SCHEMA_KEY, messages::INVALID_INPUT);
            Err(errors)
        }
    }
}

/// Validate a partial update payload
///
/// Only supplied fields are checked; an empty object is a valid no-op.
pub fn validate_update(payload: &Value) -> Result<PostPatch, ValidationErrors> {
    validate_fields(payload, false)
}

fn validate_fields(payload: &Value, required: bool) -> Result<PostPatch, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let Some(object) = payload.as_object() else {
        errors.add(SCHEMA_KEY, messages::INVALID_INPUT);
        return Err(errors);
    };

    reject_unknown_keys(object, &mut errors);

    let mut patch = PostPatch::default();
    for field in PostField::ALL {
        match object.get(field.as_str()) {
            None if required => errors.add(field.as_str(), messages::MISSING),
            None => {}
            Some(value) => {
                if let Some(text) = check_string(field, value, &mut errors) {
                    patch.set(field, text);
                }
            }
        }
    }

    errors.into_result(patch)
}

fn reject_unknown_keys(object: &Map<String, Value>, errors: &mut ValidationErrors) {
    for key in object.keys() {
        if key.parse::<PostField>().is_err() {
            errors.add(key.as_str(), messages::UNKNOWN);
        }
    }
}

fn check_string(field: PostField, value: &Value, errors: &mut ValidationErrors) -> Option<String> {
    let Some(text) = value.as_str() else {
        errors.add(field.as_str(), messages::NOT_A_STRING);
        return None;
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        errors.add(field.as_str(), messages::EMPTY);
        return None;
    }

    Some(trimmed.to_string())
}
