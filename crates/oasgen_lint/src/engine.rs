//! Rule set evaluation.

use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::diagnostic::Diagnostic;
use crate::error::{LintError, LintResult};
use crate::linter::Linter;
use crate::rules::{Assertion, Rule, RuleSet};
use crate::selector::Selector;
use crate::source_map::{SourceMap, Span};

/// A rule with its selector and pattern compiled.
#[derive(Debug, Clone)]
struct CompiledRule {
    rule: Rule,
    selector: Selector,
    pattern: Option<Regex>,
}

impl CompiledRule {
    fn new(rule: Rule) -> LintResult<Self> {
        let selector = Selector::parse(&rule.given)?;
        let pattern = match &rule.then.pattern {
            Some(p) => Some(Regex::new(p).map_err(|e| LintError::InvalidPattern {
                rule: rule.name.clone(),
                message: e.to_string(),
            })?),
            None => None,
        };

        Ok(Self {
            rule,
            selector,
            pattern,
        })
    }

    fn holds(&self, value: &Value) -> bool {
        let Assertion {
            required,
            kind,
            min_items,
            ..
        } = &self.rule.then;

        if let Value::Object(map) = value {
            if required.iter().any(|key| !map.contains_key(key)) {
                return false;
            }
        }

        if let Some(kind) = kind {
            if !kind.matches(value) {
                return false;
            }
        }

        if let (Some(pattern), Value::String(s)) = (&self.pattern, value) {
            if !pattern.is_match(s) {
                return false;
            }
        }

        if let (Some(min), Value::Array(items)) = (min_items, value) {
            if items.len() < *min {
                return false;
            }
        }

        true
    }
}

/// Evaluates a rule set against document text.
#[derive(Debug, Clone)]
pub struct RulesetLinter {
    name: String,
    rules: Vec<CompiledRule>,
}

impl RulesetLinter {
    /// Compile every enabled rule; fails on the first bad selector or pattern.
    pub fn new(ruleset: RuleSet) -> LintResult<Self> {
        let rules = ruleset
            .rules
            .into_iter()
            .filter(|rule| rule.enabled)
            .map(CompiledRule::new)
            .collect::<LintResult<Vec<_>>>()?;

        Ok(Self {
            name: ruleset.name,
            rules,
        })
    }

    pub fn generator_syntax() -> LintResult<Self> {
        Self::new(RuleSet::generator_syntax()?)
    }

    /// Evaluate an already parsed document.
    ///
    /// Every rule runs against every selected node; nothing short-circuits.
    pub fn evaluate(&self, document: &Value, map: &SourceMap, whole: Span) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for compiled in &self.rules {
            for node in compiled.selector.select(document) {
                if compiled.holds(node.value) {
                    continue;
                }

                let span = map.span(&node.pointer).unwrap_or(whole);
                diagnostics.push(
                    Diagnostic::new(
                        &self.name,
                        span.from,
                        span.to,
                        compiled.rule.severity,
                        &compiled.rule.message,
                    )
                    .with_code(&compiled.rule.name),
                );
            }
        }

        diagnostics
    }
}

impl Linter for RulesetLinter {
    fn name(&self) -> &str {
        &self.name
    }

    fn lint(&self, text: &str) -> Vec<Diagnostic> {
        let document: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => return vec![Diagnostic::parse_failure(&self.name, text, e)],
        };

        let whole = Span::new(0, text.chars().count());
        let map = SourceMap::parse(text).unwrap_or_else(|e| {
            warn!("Source positions unavailable, reporting whole-document spans: {}", e);
            SourceMap::default()
        });

        let diagnostics = self.evaluate(&document, &map, whole);
        debug!(
            "Rule set {} produced {} diagnostic(s) from {} rule(s)",
            self.name,
            diagnostics.len(),
            self.rules.len()
        );
        diagnostics
    }
}
