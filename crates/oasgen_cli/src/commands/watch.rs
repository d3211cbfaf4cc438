//! Watch command - Re-run check whenever the input changes.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use tracing::{debug, info, warn};

use super::{check_linter_names, format_report, serialize_artifact, spec_input, GlobalArgs};
use crate::config::ArtifactFormat;
use crate::pipeline::{run_check, CheckOutcome, LatestWins};

#[derive(Args)]
pub struct WatchArgs {
    /// Resource description (JSON) to watch
    input: PathBuf,

    /// Rewrite this file with the document after every clean check
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    format: Option<ArtifactFormat>,

    /// Linter to run; repeat for several (defaults to the config file)
    #[arg(short, long = "linter", value_name = "NAME")]
    linters: Vec<String>,

    /// Polling interval in milliseconds (overrides the config file)
    #[arg(long)]
    interval_ms: Option<u64>,
}

/// Where a published result goes.
struct Sink {
    output: Option<PathBuf>,
    format: ArtifactFormat,
}

impl Sink {
    fn publish(&self, revision: u64, text: &str, outcome: &CheckOutcome) {
        if outcome.report.is_clean() {
            println!("[{}] No problems found", revision);
        } else {
            println!("[{}] {} problem(s)", revision, outcome.report.diagnostics.len());
            print!("{}", format_report(text, &outcome.report));
        }

        let Some(artifact) = outcome.publishable() else {
            if let Err(e) = &outcome.artifact {
                debug!("Revision {} does not compile: {}", revision, e);
            }
            return;
        };

        let Some(path) = &self.output else {
            return;
        };
        let written = serialize_artifact(artifact, self.format)
            .and_then(|content| fs::write(path, content).map_err(Into::into));
        match written {
            Ok(()) => info!("Revision {} written to {:?}", revision, path),
            Err(e) => warn!("Failed to write {:?}: {:#}", path, e),
        }
    }
}

pub async fn execute(args: WatchArgs, global: &GlobalArgs) -> Result<()> {
    check_linter_names(&args.linters)?;
    let config = global.load_config()?;
    let interval = Duration::from_millis(args.interval_ms.unwrap_or(config.watch_interval_ms).max(1));
    let defaults = config.linter_names();
    let sink = Arc::new(Sink {
        output: args.output.clone(),
        format: args.format.unwrap_or(config.output_format),
    });
    let slot: Arc<LatestWins<CheckOutcome>> = Arc::new(LatestWins::new());

    info!("Watching {:?} every {:?}, Ctrl-C to stop", args.input, interval);

    let mut ticker = tokio::time::interval(interval);
    let mut last: Option<String> = None;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Stopped watching, last accepted revision: {:?}", slot.accepted_revision());
                return Ok(());
            }
            _ = ticker.tick() => {}
        }

        let text = match fs::read_to_string(&args.input) {
            Ok(text) => text,
            Err(e) => {
                warn!("Cannot read {:?}: {}", args.input, e);
                continue;
            }
        };
        if last.as_deref() == Some(text.as_str()) {
            continue;
        }
        last = Some(text.clone());

        let input = spec_input(&text, &args.linters)?;
        let linters = input.linters_or(&defaults).to_vec();
        let revision = slot.next_revision();
        debug!("Input changed, starting revision {}", revision);

        let slot = Arc::clone(&slot);
        let sink = Arc::clone(&sink);
        tokio::spawn(async move {
            let content: Arc<str> = Arc::from(input.content);
            match run_check(Arc::clone(&content), linters).await {
                Ok(outcome) => {
                    slot.offer(revision, outcome, |outcome| {
                        sink.publish(revision, &content, outcome)
                    });
                }
                Err(e) => warn!("Revision {} failed: {:#}", revision, e),
            }
        });
    }
}
