//! JSON-Schema conformance linting.

use jsonschema::{Draft, JSONSchema};
use serde_json::Value;
use tracing::{debug, warn};

use crate::diagnostic::{Diagnostic, Severity};
use crate::error::{LintError, LintResult};
use crate::linter::Linter;
use crate::source_map::{LineIndex, SourceMap};

const PARAMETERS_SCHEMA: &str = include_str!("../schemas/parameters.schema.json");

/// Validates documents against a fixed JSON Schema.
///
/// Each validation error is reported from the offending value's line and
/// column to the end of that line. When the value cannot be located the
/// diagnostic falls back to line 1, column 0.
pub struct SchemaLinter {
    name: String,
    schema: JSONSchema,
}

impl SchemaLinter {
    /// Compile a schema. `$schema` and `$id` are dropped before compiling.
    pub fn new(name: impl Into<String>, schema: &Value) -> LintResult<Self> {
        let mut schema = schema.clone();
        if let Value::Object(map) = &mut schema {
            map.remove("$schema");
            map.remove("$id");
        }

        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema)
            .map_err(|e| LintError::InvalidSchema(e.to_string()))?;

        Ok(Self {
            name: name.into(),
            schema: compiled,
        })
    }

    /// The built-in parameter document schema.
    pub fn parameters(name: impl Into<String>) -> LintResult<Self> {
        let schema: Value = serde_json::from_str(PARAMETERS_SCHEMA)?;
        Self::new(name, &schema)
    }
}

impl Linter for SchemaLinter {
    fn name(&self) -> &str {
        &self.name
    }

    fn lint(&self, text: &str) -> Vec<Diagnostic> {
        let document: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => return vec![Diagnostic::parse_failure(&self.name, text, e)],
        };

        let index = LineIndex::new(text);
        let map = SourceMap::parse(text).unwrap_or_else(|e| {
            warn!("Source positions unavailable, reporting from line 1: {}", e);
            SourceMap::default()
        });

        let diagnostics: Vec<Diagnostic> = match self.schema.validate(&document) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|error| {
                    let pointer = error.instance_path.to_string();
                    let (line, column) = map
                        .span(&pointer)
                        .map(|span| index.line_col(span.from))
                        .unwrap_or((1, 0));

                    Diagnostic::new(
                        &self.name,
                        index.offset(line, column),
                        index.line_end(line),
                        Severity::Error,
                        error.to_string(),
                    )
                })
                .collect(),
        };

        debug!(
            "Schema linter {} produced {} diagnostic(s)",
            self.name,
            diagnostics.len()
        );
        diagnostics
    }
}
