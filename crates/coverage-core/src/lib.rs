//! Coverage Core Library
//!
//! Classifies TestRail cases by automation status and aggregates the
//! result into summaries, grouped dumps and parameterized SQL.
//!
//! ## Pipeline
//!
//! - [`classify`]: one pass over the cases into per-status [`Buckets`]
//! - [`summarize`]: bucket sizes into a [`Summary`]
//! - [`select`]: grouped (optionally stripped) case lists in request order

pub mod case;
pub mod classify;
pub mod error;
pub mod obs;
pub mod reporting;
pub mod sections;
pub mod select;
pub mod sql;
pub mod status;
pub mod summary;
pub mod telemetry;

pub use case::{Case, Section, AUTOMATION_STATUS_FIELD, TITLE_FIELD};
pub use classify::{classify, Buckets};
pub use error::{CoverageError, Result};
pub use obs::{
    emit_artifact_written, emit_cases_fetched, emit_classified, emit_summarized, ReportSpan,
};
pub use reporting::{
    render_counts, write_json_pretty, write_summary_json, DEFAULT_CASES_PATH,
    DEFAULT_SUMMARY_PATH,
};
pub use sections::{section_names, sections_dump_file_name, strip_sections};
pub use select::{ordered_statuses, select, status_dump_file_name};
pub use sql::{
    coverage_inserts, summary_insert, validate_identifier, InsertStatement, Placeholder,
    SqlParam, DEFAULT_COVERAGE_TABLE, DEFAULT_SUMMARY_TABLE,
};
pub use status::AutomationStatus;
pub use summary::{summarize, Summary};
pub use telemetry::init_tracing;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
