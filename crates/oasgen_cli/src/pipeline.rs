//! Running the lint and compile pipelines over one input.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use tracing::debug;

use oasgen_lint::{build_linters, LintReport};
use oasgen_spec::{compile_text, CompiledArtifact, SpecError};

/// Everything one check of a document produced.
#[derive(Debug)]
pub struct CheckOutcome {
    pub report: LintReport,
    pub artifact: Result<CompiledArtifact, SpecError>,
}

impl CheckOutcome {
    /// The artifact is only worth emitting when no linter reported an error.
    pub fn publishable(&self) -> Option<&CompiledArtifact> {
        if self.report.has_errors() {
            return None;
        }
        self.artifact.as_ref().ok()
    }
}

pub fn lint_text(text: &str, linters: &[String]) -> Result<LintReport> {
    let linters = build_linters(linters)?;
    Ok(LintReport::run(&linters, text))
}

/// Lint and compile `text` concurrently on the blocking pool.
///
/// The two pipelines share nothing but the input.
pub async fn run_check(text: Arc<str>, linters: Vec<String>) -> Result<CheckOutcome> {
    let lint_input = Arc::clone(&text);
    let lint = tokio::task::spawn_blocking(move || lint_text(&lint_input, &linters));
    let compile = tokio::task::spawn_blocking(move || compile_text(&text));

    let (report, artifact) = tokio::try_join!(lint, compile).context("Pipeline task panicked")?;
    let report = report?;

    debug!(
        "Check finished: {} diagnostic(s), compiled: {}",
        report.diagnostics.len(),
        artifact.is_ok()
    );
    Ok(CheckOutcome { report, artifact })
}

/// Keeps only the newest result when runs overlap.
///
/// Each run takes a revision from [`LatestWins::next_revision`]; a result is
/// accepted only if no newer revision has been accepted already.
pub struct LatestWins<T> {
    issued: AtomicU64,
    slot: Mutex<Option<(u64, T)>>,
}

impl<T> Default for LatestWins<T> {
    fn default() -> Self {
        Self {
            issued: AtomicU64::new(0),
            slot: Mutex::new(None),
        }
    }
}

impl<T> LatestWins<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_revision(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Offer a result. `publish` runs, under the slot lock, only when the
    /// result is accepted.
    pub fn offer(&self, revision: u64, value: T, publish: impl FnOnce(&T)) -> bool {
        let mut slot = self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some((accepted, _)) = slot.as_ref() {
            if *accepted >= revision {
                debug!("Dropping stale result for revision {}", revision);
                return false;
            }
        }
        publish(&value);
        *slot = Some((revision, value));
        true
    }

    pub fn accepted_revision(&self) -> Option<u64> {
        let slot = self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        slot.as_ref().map(|(revision, _)| *revision)
    }
}
