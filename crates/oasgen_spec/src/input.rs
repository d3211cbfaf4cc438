//! Input handed to the pipelines by whatever supplies document text.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Name of the built-in declarative rule set for generator documents.
pub const GENERATOR_SYNTAX: &str = "generator-syntax";

/// Name of the JSON-Schema conformance linter.
pub const PARAMETERS_SCHEMA: &str = "parameters";

const GENERATOR_EXAMPLE: &str = include_str!("../assets/example.json");

/// Document text plus an optional override of which linters to run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecInput {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linters: Option<Vec<String>>,
}

impl SpecInput {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            linters: None,
        }
    }

    pub fn with_linters(mut self, linters: Vec<String>) -> Self {
        self.linters = Some(linters);
        self
    }

    /// Linters to run: the override if present, else the given defaults.
    pub fn linters_or<'a>(&'a self, defaults: &'a [String]) -> &'a [String] {
        self.linters.as_deref().unwrap_or(defaults)
    }
}

/// Pre-processes a fetched payload before it reaches the pipelines.
pub trait ResponseMapper {
    fn map(&self, payload: &str) -> SpecInput;
}

/// Passes the payload through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityMapper;

impl ResponseMapper for IdentityMapper {
    fn map(&self, payload: &str) -> SpecInput {
        SpecInput::new(payload)
    }
}

/// A document kind the generator understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorSpec {
    pub name: String,
    pub slug: String,
    pub example: String,
    pub linters: Vec<String>,
}

impl GeneratorSpec {
    /// The resource-description document kind.
    pub fn generator() -> Self {
        Self {
            name: "OAS Generator".to_string(),
            slug: "gen".to_string(),
            example: GENERATOR_EXAMPLE.to_string(),
            linters: vec![GENERATOR_SYNTAX.to_string()],
        }
    }

    /// Run a payload through a mapper, falling back to this spec's linters.
    pub fn input_from(&self, payload: &str, mapper: &dyn ResponseMapper) -> SpecInput {
        let mut input = mapper.map(payload);
        if input.linters.is_none() {
            input.linters = Some(self.linters.clone());
        }
        input.content = format_document(&input.content);
        input
    }
}

/// Pretty-print JSON text; anything else comes back untouched.
pub fn format_document(text: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| text.to_string()),
        Err(e) => {
            debug!("Leaving unparseable document as-is: {}", e);
            text.to_string()
        }
    }
}
