//! Templates command - List the known repository templates.

use std::collections::HashSet;

use anyhow::Result;
use clap::Args;
use tracing::warn;

use oasgen_templates::{DirectoryTemplateSource, TemplateSlug, TemplateSource};

use super::GlobalArgs;

#[derive(Args)]
pub struct TemplatesArgs {
    /// Show the remote URL of each template
    #[arg(long)]
    urls: bool,
}

pub async fn execute(args: TemplatesArgs, global: &GlobalArgs) -> Result<()> {
    let config = global.load_config()?;
    let source = DirectoryTemplateSource::new(&config.templates_dir);

    let local: HashSet<TemplateSlug> = match source.available() {
        Ok(slugs) => slugs.into_iter().collect(),
        Err(e) => {
            warn!("{}", e);
            HashSet::new()
        }
    };

    for slug in TemplateSlug::all() {
        let marker = if local.contains(&slug) { "*" } else { " " };
        let default = if slug == TemplateSlug::default() { " (default)" } else { "" };
        if args.urls {
            println!("{} {:<20} {}", marker, slug.as_str(), slug.remote_url());
        } else {
            println!("{} {}{}", marker, slug, default);
        }
    }

    println!();
    println!("* available in {:?}", config.templates_dir);
    Ok(())
}
