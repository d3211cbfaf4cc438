//! Compile command - Resource description to OpenAPI document.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use oasgen_spec::{compile, ResourceDescription};

use super::{read_input, serialize_artifact, write_output, GlobalArgs};
use crate::config::ArtifactFormat;

#[derive(Args)]
pub struct CompileArgs {
    /// Resource description (JSON), or `-` for stdin
    input: PathBuf,

    /// Write the document here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    format: Option<ArtifactFormat>,
}

pub async fn execute(args: CompileArgs, global: &GlobalArgs) -> Result<()> {
    let config = global.load_config()?;
    let text = read_input(&args.input)?;

    let description = ResourceDescription::from_json(&text)
        .with_context(|| format!("Invalid resource description {:?}", args.input))?;
    let artifact = compile(&description);
    info!(
        "Compiled {} resource(s) into {} path(s)",
        description.resources.len(),
        artifact.paths.len()
    );

    let format = args.format.unwrap_or(config.output_format);
    write_output(args.output.as_deref(), &serialize_artifact(&artifact, format)?)
}
