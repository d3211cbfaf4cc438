//! # oasgen_lint
//!
//! Structural validation of oasgen input documents.
//!
//! Two independent linters run over the raw input text:
//!
//! - **Rule sets**: ordered, named rules loaded from YAML. Each rule selects
//!   nodes with a JSONPath-style expression and asserts a small JSON-Schema
//!   fragment against them
//! - **Schema conformance**: a fixed JSON Schema checked with `jsonschema`
//!
//! Both report problems as [`Diagnostic`]s carrying character offsets into
//! the original text, so a consumer can map each finding back to a
//! selectable range. Text that is not JSON yields a single whole-document
//! diagnostic rather than an error.
//!
//! ## Example
//!
//! ```rust
//! use oasgen_lint::{Linter, RulesetLinter};
//!
//! let linter = RulesetLinter::generator_syntax().unwrap();
//! let diagnostics = linter.lint(r#"{"title": ""}"#);
//!
//! for d in &diagnostics {
//!     println!("{}..{} {} {}", d.from, d.to, d.severity, d);
//! }
//! assert!(!diagnostics.is_empty());
//! ```

pub mod diagnostic;
pub mod engine;
pub mod error;
pub mod linter;
pub mod rules;
pub mod schema;
pub mod selector;
pub mod source_map;

pub use diagnostic::{group_by_source, Diagnostic, Severity};
pub use engine::RulesetLinter;
pub use error::{LintError, LintResult};
pub use linter::{build_linters, LintReport, Linter, LinterKind};
pub use rules::{Assertion, JsonType, Rule, RuleSet, WORD_PATTERN};
pub use schema::SchemaLinter;
pub use selector::{Segment, Selected, Selector};
pub use source_map::{LineIndex, SourceMap, Span};
