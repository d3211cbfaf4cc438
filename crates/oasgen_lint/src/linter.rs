//! The linter seam and the registry of built-in linters.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use oasgen_spec::{GENERATOR_SYNTAX, PARAMETERS_SCHEMA};

use crate::diagnostic::{group_by_source, Diagnostic, Severity};
use crate::engine::RulesetLinter;
use crate::error::{LintError, LintResult};
use crate::schema::SchemaLinter;

/// Anything that turns document text into diagnostics.
///
/// Implementations never fail on bad input: unparseable text is reported as
/// a diagnostic.
pub trait Linter: Send + Sync {
    /// Source name stamped on every diagnostic.
    fn name(&self) -> &str;

    fn lint(&self, text: &str) -> Vec<Diagnostic>;
}

/// Built-in linters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum LinterKind {
    GeneratorSyntax,
    Parameters,
}

impl LinterKind {
    pub fn all() -> Vec<LinterKind> {
        vec![LinterKind::GeneratorSyntax, LinterKind::Parameters]
    }

    pub fn name(&self) -> &'static str {
        match self {
            LinterKind::GeneratorSyntax => GENERATOR_SYNTAX,
            LinterKind::Parameters => PARAMETERS_SCHEMA,
        }
    }

    pub fn build(&self) -> LintResult<Box<dyn Linter>> {
        Ok(match self {
            LinterKind::GeneratorSyntax => Box::new(RulesetLinter::generator_syntax()?),
            LinterKind::Parameters => Box::new(SchemaLinter::parameters(self.name())?),
        })
    }
}

impl fmt::Display for LinterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LinterKind {
    type Err = LintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LinterKind::all()
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| LintError::UnknownLinter(s.to_string()))
    }
}

/// Build linters by name, e.g. from [`oasgen_spec::SpecInput::linters`].
pub fn build_linters<S: AsRef<str>>(names: &[S]) -> LintResult<Vec<Box<dyn Linter>>> {
    names
        .iter()
        .map(|name| name.as_ref().parse::<LinterKind>()?.build())
        .collect()
}

/// Diagnostics from one pass over a document by several linters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintReport {
    pub diagnostics: Vec<Diagnostic>,
}

impl LintReport {
    /// Run every linter over the same text; each runs independently.
    pub fn run(linters: &[Box<dyn Linter>], text: &str) -> Self {
        let diagnostics = linters.iter().flat_map(|linter| linter.lint(text)).collect();
        Self { diagnostics }
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn grouped(&self) -> BTreeMap<String, Vec<Diagnostic>> {
        group_by_source(&self.diagnostics)
    }

    /// Number of diagnostics per source.
    pub fn counts(&self) -> BTreeMap<String, usize> {
        self.grouped()
            .into_iter()
            .map(|(source, items)| (source, items.len()))
            .collect()
    }
}
