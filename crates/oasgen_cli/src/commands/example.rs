//! Example command - Print the bundled example resource description.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use oasgen_spec::{format_document, GeneratorSpec};

use super::write_output;

#[derive(Args)]
pub struct ExampleArgs {
    /// Write the example here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn execute(args: ExampleArgs) -> Result<()> {
    let spec = GeneratorSpec::generator();
    write_output(args.output.as_deref(), &format_document(&spec.example))
}
