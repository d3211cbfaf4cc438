//! CLI command definitions.
//!
//! Each subcommand maps to one pipeline: lint, compile, render, or the
//! combined check that the `watch` loop repeats on every change.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use oasgen_lint::{LineIndex, LintReport, LinterKind};
use oasgen_spec::{CompiledArtifact, IdentityMapper, ResponseMapper, SpecInput};

use crate::config::{ArtifactFormat, CliConfig};

pub mod check;
pub mod compile;
pub mod example;
pub mod lint;
pub mod render;
pub mod templates;
pub mod watch;

/// oasgen - OpenAPI generator for resource descriptions
#[derive(Parser)]
#[command(name = "oasgen")]
#[command(version, about = "oasgen - generate OpenAPI documents from resource descriptions")]
#[command(long_about = r#"
oasgen turns a small resource description (title, description, contact and a
list of resources) into a complete OpenAPI 3.0 document, lints resource
descriptions with precise source positions, and fills repository templates
from the same document.

WORKFLOWS:
  compile    → Compile a resource description into an OpenAPI document
  lint       → Report problems in a resource description
  check      → Lint and compile together; emit the document only when clean
  watch      → Re-run check whenever the input file changes
  render     → Fill a repository template from a document
  templates  → List the known repository templates
  example    → Print an example resource description

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Validation failure
  4 - Template error

Use `-` as input path to read from stdin.
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Configuration file (defaults to ./oasgen.toml when present)
    #[arg(long, global = true, env = "OASGEN_CONFIG")]
    pub config: Option<PathBuf>,
}

impl GlobalArgs {
    pub fn load_config(&self) -> Result<CliConfig> {
        CliConfig::load(self.config.as_deref())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a resource description into an OpenAPI document
    Compile(compile::CompileArgs),

    /// Lint a resource description
    Lint(lint::LintArgs),

    /// Lint and compile a resource description concurrently
    Check(check::CheckArgs),

    /// Fill a repository template from a document
    Render(render::RenderArgs),

    /// List the known repository templates
    Templates(templates::TemplatesArgs),

    /// Print the bundled example resource description
    Example(example::ExampleArgs),

    /// Re-run check whenever the input changes
    Watch(watch::WatchArgs),
}

/// Failures that map to a dedicated exit code.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("validation failed with {errors} error(s)")]
    ValidationFailed { errors: usize },

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Read the input document; `-` reads stdin.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        return Ok(buffer);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read input {:?}", path))
}

/// Write to `output`, or stdout when absent.
pub fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
            tracing::info!("Wrote {:?}", path);
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

/// Reject `--linter` names that do not name a built-in linter.
pub fn check_linter_names(names: &[String]) -> Result<()> {
    if let Some(unknown) = names.iter().find(|name| name.parse::<LinterKind>().is_err()) {
        let known: Vec<&str> = LinterKind::all().iter().map(|kind| kind.name()).collect();
        return Err(CommandError::InvalidArgs(format!(
            "unknown linter '{}' (expected one of: {})",
            unknown,
            known.join(", ")
        ))
        .into());
    }
    Ok(())
}

/// Wrap raw text as pipeline input, with `--linter` overrides if any.
pub fn spec_input(payload: &str, overrides: &[String]) -> Result<SpecInput> {
    check_linter_names(overrides)?;

    let input = IdentityMapper.map(payload);
    if overrides.is_empty() {
        Ok(input)
    } else {
        Ok(input.with_linters(overrides.to_vec()))
    }
}

pub fn serialize_artifact(artifact: &CompiledArtifact, format: ArtifactFormat) -> Result<String> {
    Ok(match format {
        ArtifactFormat::Json => artifact.to_json()?,
        ArtifactFormat::Yaml => artifact.to_yaml()?,
    })
}

/// Human-readable diagnostics, grouped by source, with 1-based positions.
pub fn format_report(text: &str, report: &LintReport) -> String {
    let index = LineIndex::new(text);
    let mut out = String::new();

    for (source, diagnostics) in report.grouped() {
        out.push_str(&format!("{} ({})\n", source, diagnostics.len()));
        for d in diagnostics {
            let (line, column) = index.line_col(d.from);
            out.push_str(&format!(
                "  {}:{} {:<7} {}\n",
                line,
                column + 1,
                d.severity.to_string(),
                d
            ));
        }
    }
    out
}

/// Turn a report with errors into a validation failure.
pub fn ensure_clean(report: &LintReport) -> Result<()> {
    let errors = report.count(oasgen_lint::Severity::Error);
    if errors > 0 {
        return Err(CommandError::ValidationFailed { errors }.into());
    }
    Ok(())
}
