//! oasgen CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Validation failure
//! - 4: Template error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod pipeline;

use commands::{Cli, CommandError, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const TEMPLATE_ERROR: u8 = 4;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Compile(args) => commands::compile::execute(args, &cli.global).await,
        Commands::Lint(args) => commands::lint::execute(args, &cli.global).await,
        Commands::Check(args) => commands::check::execute(args, &cli.global).await,
        Commands::Render(args) => commands::render::execute(args, &cli.global).await,
        Commands::Templates(args) => commands::templates::execute(args, &cli.global).await,
        Commands::Example(args) => commands::example::execute(args).await,
        Commands::Watch(args) => commands::watch::execute(args, &cli.global).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "oasgen=debug"
    } else if quiet {
        "oasgen=warn"
    } else {
        "oasgen=info"
    };

    let mut filter = EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());
    if let Ok(directive) = level.parse() {
        filter = filter.add_directive(directive);
    }

    // Ignore the error when a subscriber is already installed.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

/// Map an error chain to an exit code.
fn categorize_error(e: &anyhow::Error) -> u8 {
    for cause in e.chain() {
        if let Some(err) = cause.downcast_ref::<CommandError>() {
            return match err {
                CommandError::ValidationFailed { .. } => ExitCodes::VALIDATION_FAILURE,
                CommandError::InvalidArgs(_) => ExitCodes::INVALID_ARGS,
            };
        }
        if cause.is::<oasgen_spec::SpecError>() {
            return ExitCodes::VALIDATION_FAILURE;
        }
        if cause.is::<oasgen_templates::TemplateError>() {
            return ExitCodes::TEMPLATE_ERROR;
        }
        if let Some(oasgen_lint::LintError::UnknownLinter(_)) =
            cause.downcast_ref::<oasgen_lint::LintError>()
        {
            return ExitCodes::INVALID_ARGS;
        }
    }
    ExitCodes::GENERAL_ERROR
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_categorize_typed_errors() {
        let err = anyhow::Error::new(CommandError::ValidationFailed { errors: 2 });
        assert_eq!(categorize_error(&err), ExitCodes::VALIDATION_FAILURE);

        let err: anyhow::Result<()> =
            Err(oasgen_templates::TemplateError::NotFound("README.md".into()))
                .context("Failed to load template");
        assert_eq!(categorize_error(&err.unwrap_err()), ExitCodes::TEMPLATE_ERROR);

        let err = anyhow::Error::new(oasgen_spec::SpecError::MissingField("title".into()));
        assert_eq!(categorize_error(&err), ExitCodes::VALIDATION_FAILURE);

        let err = anyhow::Error::new(oasgen_lint::LintError::UnknownLinter("x".into()));
        assert_eq!(categorize_error(&err), ExitCodes::INVALID_ARGS);

        assert_eq!(
            categorize_error(&anyhow::anyhow!("disk full")),
            ExitCodes::GENERAL_ERROR
        );
    }
}
