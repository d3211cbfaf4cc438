//! Error types for the spec module.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for spec operations.
pub type SpecResult<T> = Result<T, SpecError>;

/// Errors that can occur while reading or compiling a resource description.
#[derive(Error, Debug)]
pub enum SpecError {
    #[error("Resource description not found at path: {0}")]
    NotFound(PathBuf),

    #[error("Invalid resource description at line {line}, column {column}: {message}")]
    InvalidFormat {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SpecError {
    /// Classify a JSON deserialization failure.
    ///
    /// Serde reports absent fields as `missing field `x``; those become
    /// [`SpecError::MissingField`] so callers can tell a precondition failure
    /// from malformed text.
    pub fn from_json_error(err: serde_json::Error) -> Self {
        let message = err.to_string();
        if let Some(rest) = message.strip_prefix("missing field `") {
            if let Some(end) = rest.find('`') {
                return SpecError::MissingField(rest[..end].to_string());
            }
        }

        SpecError::InvalidFormat {
            line: err.line(),
            column: err.column(),
            message,
        }
    }
}
