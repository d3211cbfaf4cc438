//! Error types for the lint module.
//!
//! These cover building linters (bad rule sets, selectors, patterns or
//! schemas). Problems in the linted document itself are never errors; they
//! come back as diagnostics.

use thiserror::Error;

/// Result type alias for lint operations.
pub type LintResult<T> = Result<T, LintError>;

/// Errors that can occur while building or configuring linters.
#[derive(Error, Debug)]
pub enum LintError {
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("Invalid pattern in rule {rule}: {message}")]
    InvalidPattern { rule: String, message: String },

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Unknown linter: {0}")]
    UnknownLinter(String),

    #[error("Malformed JSON at offset {offset}: {message}")]
    Scan { offset: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
