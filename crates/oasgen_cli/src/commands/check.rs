//! Check command - Lint and compile in one pass.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use super::{
    ensure_clean, format_report, read_input, serialize_artifact, spec_input, write_output,
    GlobalArgs,
};
use crate::config::ArtifactFormat;
use crate::pipeline::run_check;

#[derive(Args)]
pub struct CheckArgs {
    /// Resource description (JSON), or `-` for stdin
    input: PathBuf,

    /// Write the document here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    format: Option<ArtifactFormat>,

    /// Linter to run; repeat for several (defaults to the config file)
    #[arg(short, long = "linter", value_name = "NAME")]
    linters: Vec<String>,
}

pub async fn execute(args: CheckArgs, global: &GlobalArgs) -> Result<()> {
    let config = global.load_config()?;
    let text = read_input(&args.input)?;

    let input = spec_input(&text, &args.linters)?;
    let linters = input.linters_or(&config.linter_names()).to_vec();
    let outcome = run_check(Arc::from(input.content.as_str()), linters).await?;

    if !outcome.report.is_clean() {
        eprint!("{}", format_report(&input.content, &outcome.report));
    }
    ensure_clean(&outcome.report)?;

    let artifact = outcome
        .artifact
        .context("Linters passed but the document does not compile")?;

    info!("Check passed, {} path(s)", artifact.paths.len());
    let format = args.format.unwrap_or(config.output_format);
    write_output(args.output.as_deref(), &serialize_artifact(&artifact, format)?)
}
