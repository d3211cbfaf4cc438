//! Declarative lint rules and rule sets.
//!
//! A rule pairs a selector (`given`) with an assertion (`then`). The
//! assertion vocabulary is a small JSON-Schema fragment: `required`, `type`,
//! `pattern` and `min_items`. Rule sets are written in YAML.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::diagnostic::Severity;
use crate::error::LintResult;

const GENERATOR_SYNTAX_YAML: &str = include_str!("../rulesets/generator-syntax.yaml");

/// Pattern for a "non-empty string": at least one ASCII word character.
/// Not `\w`: the `regex` crate's `\w` also matches non-ASCII letters.
pub const WORD_PATTERN: &str = "[A-Za-z0-9_]+";

/// A single lint rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rule {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub severity: Severity,
    /// Selector for the nodes this rule checks.
    pub given: String,
    pub then: Assertion,
    /// Reported verbatim for every failing node.
    pub message: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Rule {
    /// Rule requiring the selected object to have the given keys.
    pub fn required(
        name: impl Into<String>,
        given: impl Into<String>,
        keys: &[&str],
        message: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            given,
            Assertion {
                required: keys.iter().map(|k| k.to_string()).collect(),
                ..Default::default()
            },
            message,
        )
    }

    /// Rule requiring the selected value to be a string with an ASCII word character.
    pub fn non_empty_string(
        name: impl Into<String>,
        given: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            given,
            Assertion {
                kind: Some(JsonType::String),
                pattern: Some(WORD_PATTERN.to_string()),
                ..Default::default()
            },
            message,
        )
    }

    pub fn new(
        name: impl Into<String>,
        given: impl Into<String>,
        then: Assertion,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            severity: Severity::Error,
            given: given.into(),
            then,
            message: message.into(),
            enabled: true,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// JSON value types an assertion can demand.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JsonType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
}

impl JsonType {
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            JsonType::String => value.is_string(),
            JsonType::Number => value.is_number(),
            JsonType::Integer => value.is_i64() || value.is_u64(),
            JsonType::Boolean => value.is_boolean(),
            JsonType::Array => value.is_array(),
            JsonType::Object => value.is_object(),
            JsonType::Null => value.is_null(),
        }
    }
}

/// Constraints a selected node must satisfy.
///
/// Each keyword only applies to the value type it concerns: `required` to
/// objects, `pattern` to strings, `min_items` to arrays. Use `type` to
/// demand the value type itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Assertion {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<JsonType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
}

/// An ordered, named collection of rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RuleSet {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// The built-in rules for resource description documents.
    pub fn generator_syntax() -> LintResult<Self> {
        Self::from_yaml(GENERATOR_SYNTAX_YAML)
    }

    pub fn from_yaml(content: &str) -> LintResult<Self> {
        let set: RuleSet = serde_yaml::from_str(content)?;
        debug!("Loaded rule set {} with {} rule(s)", set.name, set.rules.len());
        Ok(set)
    }

    pub fn from_path(path: impl AsRef<Path>) -> LintResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Add a rule to the set.
    pub fn add(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generator_syntax_catalogue() {
        let set = RuleSet::generator_syntax().unwrap();
        assert_eq!(set.name, "generator-syntax");
        assert_eq!(set.rules.len(), 18);
        assert_eq!(set.rules[0].name, "title-required");
        assert_eq!(set.rules[17].name, "resource-readonly-boolean");
        assert!(set.rules.iter().all(|r| r.severity == Severity::Error && r.enabled));

        let title = set.get("title-string").unwrap();
        assert_eq!(title.then.kind, Some(JsonType::String));
        assert_eq!(title.then.pattern.as_deref(), Some(WORD_PATTERN));

        let resources = set.get("resources-array").unwrap();
        assert_eq!(resources.then.min_items, Some(1));
    }

    #[test]
    fn test_builders_match_catalogue() {
        let set = RuleSet::generator_syntax().unwrap();
        let built = Rule::non_empty_string("title-string", "$.title", "Title must be a non-empty string");
        assert_eq!(set.get("title-string"), Some(&built));

        let built = Rule::required("contact-email-required", "$.contact", &["email"], "Contact email is required");
        assert_eq!(set.get("contact-email-required"), Some(&built));
    }

    #[test]
    fn test_json_type_matches() {
        assert!(JsonType::Integer.matches(&json!(3)));
        assert!(!JsonType::Integer.matches(&json!(3.5)));
        assert!(JsonType::Number.matches(&json!(3.5)));
        assert!(JsonType::Boolean.matches(&json!(false)));
        assert!(!JsonType::Boolean.matches(&json!("false")));
    }

    #[test]
    fn test_rule_set_from_yaml_defaults() {
        let set = RuleSet::from_yaml(
            "name: custom\nrules:\n  - name: r\n    given: \"$\"\n    then: {required: [x]}\n    message: X\n",
        )
        .unwrap();
        let rule = &set.rules[0];
        assert_eq!(rule.severity, Severity::Error);
        assert!(rule.enabled);
        assert_eq!(rule.then.required, vec!["x".to_string()]);
    }
}
