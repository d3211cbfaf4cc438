//! Lint command - Report problems in a resource description.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use tracing::info;

use super::{ensure_clean, format_report, read_input, spec_input, GlobalArgs};
use crate::pipeline::lint_text;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct LintArgs {
    /// Resource description (JSON), or `-` for stdin
    input: PathBuf,

    /// Linter to run; repeat for several (defaults to the config file)
    #[arg(short, long = "linter", value_name = "NAME")]
    linters: Vec<String>,

    /// How to print diagnostics
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    report: ReportFormat,
}

pub async fn execute(args: LintArgs, global: &GlobalArgs) -> Result<()> {
    let config = global.load_config()?;
    let text = read_input(&args.input)?;

    let input = spec_input(&text, &args.linters)?;
    let defaults = config.linter_names();
    let report = lint_text(&input.content, input.linters_or(&defaults))?;

    match args.report {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report.grouped())?),
        ReportFormat::Text if report.is_clean() => println!("No problems found"),
        ReportFormat::Text => print!("{}", format_report(&input.content, &report)),
    }

    info!("{} diagnostic(s)", report.diagnostics.len());
    ensure_clean(&report)
}
