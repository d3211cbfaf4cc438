//! Render command - Fill a repository template from a document.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::{debug, info};

use oasgen_templates::{DirectoryTemplateSource, TemplateRenderer, TemplateSlug, TemplateSource};

use super::{read_input, write_output, GlobalArgs};

#[derive(Args)]
pub struct RenderArgs {
    /// Document whose values fill the template, or `-` for stdin
    input: PathBuf,

    /// Template to render
    #[arg(short, long, default_value_t = TemplateSlug::default())]
    template: TemplateSlug,

    /// Local checkout of the template repository (overrides the config file)
    #[arg(long)]
    templates_dir: Option<PathBuf>,

    /// Write the rendered text here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn execute(args: RenderArgs, global: &GlobalArgs) -> Result<()> {
    let config = global.load_config()?;
    let templates_dir = args.templates_dir.unwrap_or(config.templates_dir);
    let source = DirectoryTemplateSource::new(templates_dir);

    let template = source.fetch(args.template).with_context(|| {
        format!(
            "Failed to load template {} (published at {})",
            args.template,
            args.template.remote_url()
        )
    })?;
    let text = read_input(&args.input)?;

    let renderer = TemplateRenderer::new();
    let rendered = renderer.render(&text, &template);
    debug!("Markers in {}: {:?}", args.template, renderer.markers(&template));
    info!(
        "Rendered {} ({:?})",
        args.template,
        args.template.output_format()
    );

    write_output(args.output.as_deref(), &rendered)
}
