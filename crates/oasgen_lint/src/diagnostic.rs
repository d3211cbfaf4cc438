//! Diagnostics produced by linters.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Diagnostic severity levels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Error,
    Warning,
    Info,
    Hint,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Hint => "hint",
        };
        f.write_str(label)
    }
}

/// A single finding with a character span into the linted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Name of the linter or rule set that produced this diagnostic.
    pub source: String,
    pub from: usize,
    pub to: usize,
    pub severity: Severity,
    pub message: String,
    /// Rule name, when the diagnostic came from a named rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Diagnostic {
    pub fn new(
        source: impl Into<String>,
        from: usize,
        to: usize,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            from,
            to,
            severity,
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// A whole-document error for text that is not well-formed JSON.
    pub fn parse_failure(source: impl Into<String>, text: &str, reason: impl fmt::Display) -> Self {
        Self::new(
            source,
            0,
            text.chars().count(),
            Severity::Error,
            format!("Invalid JSON: {}", reason),
        )
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "[{}] {}", code, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Group diagnostics by source, keeping every entry and its order.
pub fn group_by_source(diagnostics: &[Diagnostic]) -> BTreeMap<String, Vec<Diagnostic>> {
    let mut groups: BTreeMap<String, Vec<Diagnostic>> = BTreeMap::new();
    for diagnostic in diagnostics {
        groups
            .entry(diagnostic.source.clone())
            .or_default()
            .push(diagnostic.clone());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_source_keeps_multiplicity() {
        let diagnostics = vec![
            Diagnostic::new("a", 0, 1, Severity::Error, "one"),
            Diagnostic::new("b", 0, 1, Severity::Warning, "two"),
            Diagnostic::new("a", 0, 1, Severity::Error, "one"),
        ];

        let groups = group_by_source(&diagnostics);
        assert_eq!(groups["a"].len(), 2);
        assert_eq!(groups["b"].len(), 1);
    }

    #[test]
    fn test_display_prefixes_code() {
        let d = Diagnostic::new("gen", 0, 1, Severity::Error, "Title is required")
            .with_code("title-required");
        assert_eq!(d.to_string(), "[title-required] Title is required");
    }

    #[test]
    fn test_parse_failure_spans_document_in_chars() {
        let d = Diagnostic::parse_failure("gen", "{ \"ë\": ", "EOF");
        assert_eq!((d.from, d.to), (0, 7));
        assert!(d.is_error());
    }
}
