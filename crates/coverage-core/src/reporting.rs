use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::status::AutomationStatus;
use crate::summary::Summary;

/// Default path for the JSON summary artifact.
pub const DEFAULT_SUMMARY_PATH: &str = "output.json";

/// Default path for the raw case dump.
pub const DEFAULT_CASES_PATH: &str = "cases.json";

/// Write any serializable artifact as pretty JSON.
///
/// Opaque records serialize with sorted keys; typed records such as
/// [`Summary`] keep their declared field order.
pub fn write_json_pretty<T: Serialize + ?Sized>(path: &Path, artifact: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(artifact).context("serialize artifact")?;
    std::fs::write(path, content).with_context(|| format!("write {:?}", path))?;
    Ok(())
}

/// Write the summary artifact.
pub fn write_summary_json(path: &Path, summary: &Summary) -> Result<()> {
    write_json_pretty(path, summary)
}

/// Render the per-status counts as console lines.
pub fn render_counts(summary: &Summary) -> String {
    let mut out = String::new();
    for status in AutomationStatus::ALL {
        out.push_str(&format!(
            "{} {} automated tests.\n",
            summary.count(status),
            status.key()
        ));
    }
    out
}
