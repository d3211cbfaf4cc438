//! # oasgen_templates
//!
//! Repository templates and placeholder substitution for oasgen.
//!
//! Templates are plain text files (Markdown, or YAML for `publiccode.yml`)
//! containing `{{ dotted.path }}` markers. Rendering resolves each marker
//! against the JSON input document; anything that does not resolve is left
//! untouched.
//!
//! ## Example
//!
//! ```rust
//! use oasgen_templates::{render_from, InMemoryTemplateSource, TemplateSlug};
//!
//! let source = InMemoryTemplateSource::new()
//!     .with_template(TemplateSlug::Readme, "# {{ title }}\n{{ unknown }}");
//!
//! let text = render_from(&source, TemplateSlug::Readme, r#"{"title": "Orders API"}"#).unwrap();
//! assert_eq!(text, "# Orders API\n{{ unknown }}");
//! ```

pub mod catalog;
pub mod error;
pub mod renderer;
pub mod source;

pub use catalog::{OutputFormat, TemplateSlug, REMOTE_TEMPLATES_BASE};
pub use error::{TemplateError, TemplateResult};
pub use renderer::{resolve, TemplateRenderer};
pub use source::{render_from, DirectoryTemplateSource, InMemoryTemplateSource, TemplateSource};
