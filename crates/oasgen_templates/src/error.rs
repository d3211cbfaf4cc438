//! Error types for templates.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that can occur while locating template text.
///
/// Substitution itself never fails; unresolved markers stay in the output.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Unknown template: {0}")]
    UnknownSlug(String),

    #[error("Template not available: {0}")]
    NotFound(String),

    #[error("Templates directory does not exist: {0}")]
    MissingDirectory(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}
