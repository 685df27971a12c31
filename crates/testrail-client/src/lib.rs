//! TestRail-Client: read-only TestRail API access for coverage reports
//!
//! This crate is the network layer of the coverage tooling. It loads
//! credentials from the environment, talks to the TestRail REST API v2
//! and hands case and section records to `coverage-core`.
//!
//! ## Key Components
//!
//! - `TestRailConfig`: instance URL, credentials and timeout
//! - `TestRailClient`: reqwest-based API client
//! - `CaseSource`: the trait report commands consume
//! - `fakes::MemorySource`: in-memory `CaseSource` for tests

pub mod client;
pub mod config;
mod error;
pub mod fakes;
pub mod models;
pub mod source;

pub use client::TestRailClient;
pub use config::TestRailConfig;
pub use error::TestRailError;
pub use models::{Priority, Project, Run, Suite};
pub use source::CaseSource;

/// Result type for testrail-client operations
pub type Result<T> = std::result::Result<T, TestRailError>;
