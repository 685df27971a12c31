//! The `CaseSource` abstraction consumed by report commands.
//!
//! Report logic only needs a handful of read calls. Keeping them behind a
//! trait lets commands run against [`TestRailClient`] in production and
//! against [`crate::fakes::MemorySource`] in tests.

use async_trait::async_trait;
use coverage_core::{Case, Section};

use crate::client::TestRailClient;
use crate::models::{Project, Suite};
use crate::Result;

/// Read-only access to TestRail entities.
#[async_trait]
pub trait CaseSource: Send + Sync {
    async fn project(&self, project_id: u64) -> Result<Project>;

    async fn projects(&self) -> Result<Vec<Project>>;

    async fn suite(&self, suite_id: u64) -> Result<Suite>;

    async fn suites(&self, project_id: u64) -> Result<Vec<Suite>>;

    /// Cases of a suite; empty `type_ids` means no type filter.
    async fn cases(&self, project_id: u64, suite_id: u64, type_ids: &[u8]) -> Result<Vec<Case>>;

    async fn sections(&self, project_id: u64, suite_id: u64) -> Result<Vec<Section>>;
}

#[async_trait]
impl CaseSource for TestRailClient {
    async fn project(&self, project_id: u64) -> Result<Project> {
        self.get_project(project_id).await
    }

    async fn projects(&self) -> Result<Vec<Project>> {
        self.get_projects().await
    }

    async fn suite(&self, suite_id: u64) -> Result<Suite> {
        self.get_suite(suite_id).await
    }

    async fn suites(&self, project_id: u64) -> Result<Vec<Suite>> {
        self.get_suites(project_id).await
    }

    async fn cases(&self, project_id: u64, suite_id: u64, type_ids: &[u8]) -> Result<Vec<Case>> {
        self.get_cases(project_id, suite_id, type_ids).await
    }

    async fn sections(&self, project_id: u64, suite_id: u64) -> Result<Vec<Section>> {
        self.get_sections(project_id, suite_id).await
    }
}
