//! Error types for Masterblog
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

use crate::model::PostId;
use crate::validation::ValidationErrors;

/// Result type alias using BlogError
pub type Result<T> = std::result::Result<T, BlogError>;

/// Unified error type for Masterblog operations
#[derive(Debug, Error)]
pub enum BlogError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Request Errors
    // -------------------------------------------------------------------------
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("{0}")]
    InvalidParameter(String),

    #[error("Post with id {0} not found")]
    PostNotFound(PostId),

    #[error("The requested URL {0} was not found on the server.")]
    RouteNotFound(String),

    #[error("Unauthorized: Invalid or missing API key.")]
    Unauthorized,

    #[error("Rate limit exceeded, retry in {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: u64 },

    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    #[error("No post id left after {0}")]
    IdsExhausted(PostId),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BlogError {
    /// HTTP status code this error surfaces as
    pub fn status_code(&self) -> u16 {
        match self {
            BlogError::Validation(_) | BlogError::InvalidParameter(_) => 400,
            BlogError::Unauthorized => 401,
            BlogError::PostNotFound(_) | BlogError::RouteNotFound(_) => 404,
            BlogError::RateLimited { .. } => 429,
            BlogError::Io(_)
            | BlogError::Serialization(_)
            | BlogError::IdsExhausted(_)
            | BlogError::Config(_) => 500,
        }
    }

    /// True for errors caused by the request rather than by the server
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

impl From<ValidationErrors> for BlogError {
    fn from(errors: ValidationErrors) -> Self {
        BlogError::Validation(errors)
    }
}
