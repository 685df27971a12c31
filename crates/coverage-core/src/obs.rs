//! Structured observability hooks for a coverage report run.
//!
//! Each report run gets a `ReportSpan` tagging every log line with the
//! project and suite ids; the `emit_*` helpers log the lifecycle events at
//! `info!` (dropped cases at `warn!`).

use tracing::{info, warn};

use crate::classify::Buckets;
use crate::summary::Summary;

/// RAII guard that enters a report-scoped tracing span.
pub struct ReportSpan {
    _span: tracing::span::EnteredSpan,
}

impl ReportSpan {
    pub fn enter(project_id: u64, suite_id: u64) -> Self {
        let span = tracing::info_span!("coverage.report", project_id, suite_id);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: case records fetched from TestRail.
pub fn emit_cases_fetched(count: usize) {
    info!(event = "report.fetched", cases = count);
}

/// Emit event: cases classified. Dropped cases get their own warning.
pub fn emit_classified(buckets: &Buckets) {
    info!(
        event = "report.classified",
        classified = buckets.classified(),
        dropped = buckets.dropped(),
    );
    if buckets.dropped() > 0 {
        warn!(
            event = "report.dropped",
            dropped = buckets.dropped(),
            "cases without a recognised automation status were excluded"
        );
    }
}

/// Emit event: summary computed.
pub fn emit_summarized(summary: &Summary) {
    info!(
        event = "report.summarized",
        project = %summary.project_name,
        suite = %summary.suite,
        untriaged = summary.untriaged,
        suitable = summary.suitable,
        unsuitable = summary.unsuitable,
        completed = summary.completed,
        disabled = summary.disabled,
    );
}

/// Emit event: an artifact was written to disk.
pub fn emit_artifact_written(path: &std::path::Path) {
    info!(event = "report.written", path = %path.display());
}
