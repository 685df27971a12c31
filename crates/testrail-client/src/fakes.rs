//! In-memory fake for the `CaseSource` trait (testing only)
//!
//! `MemorySource` answers from fixed maps and reproduces TestRail's
//! "not a valid or accessible" 400 responses for unknown ids.

use std::collections::HashMap;

use async_trait::async_trait;
use coverage_core::{Case, Section};

use crate::error::TestRailError;
use crate::models::{Project, Suite};
use crate::source::CaseSource;
use crate::Result;

/// In-memory case source keyed by project and suite id.
#[derive(Debug, Default)]
pub struct MemorySource {
    projects: Vec<Project>,
    suites: Vec<Suite>,
    cases: HashMap<u64, Vec<Case>>,
    sections: HashMap<u64, Vec<Section>>,
    failing_cases: bool,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.push(project);
        self
    }

    pub fn with_suite(mut self, suite: Suite) -> Self {
        self.suites.push(suite);
        self
    }

    pub fn with_cases(mut self, suite_id: u64, cases: Vec<Case>) -> Self {
        self.cases.insert(suite_id, cases);
        self
    }

    pub fn with_sections(mut self, suite_id: u64, sections: Vec<Section>) -> Self {
        self.sections.insert(suite_id, sections);
        self
    }

    /// Make every `cases` call fail with an HTTP 500.
    pub fn failing_cases(mut self) -> Self {
        self.failing_cases = true;
        self
    }

    fn ensure_project(&self, project_id: u64, endpoint: &str) -> Result<()> {
        if self.projects.iter().any(|p| p.id == project_id) {
            Ok(())
        } else {
            Err(not_accessible(endpoint, "project_id", "project"))
        }
    }
}

fn not_accessible(endpoint: &str, field: &str, entity: &str) -> TestRailError {
    TestRailError::Api {
        endpoint: endpoint.to_string(),
        status: 400,
        message: format!("Field :{} is not a valid or accessible {}.", field, entity),
    }
}

#[async_trait]
impl CaseSource for MemorySource {
    async fn project(&self, project_id: u64) -> Result<Project> {
        let endpoint = format!("get_project/{}", project_id);
        self.projects
            .iter()
            .find(|p| p.id == project_id)
            .cloned()
            .ok_or_else(|| not_accessible(&endpoint, "project_id", "project"))
    }

    async fn projects(&self) -> Result<Vec<Project>> {
        Ok(self.projects.clone())
    }

    async fn suite(&self, suite_id: u64) -> Result<Suite> {
        let endpoint = format!("get_suite/{}", suite_id);
        self.suites
            .iter()
            .find(|s| s.id == suite_id)
            .cloned()
            .ok_or_else(|| not_accessible(&endpoint, "suite_id", "test suite"))
    }

    async fn suites(&self, project_id: u64) -> Result<Vec<Suite>> {
        self.ensure_project(project_id, &format!("get_suites/{}", project_id))?;
        Ok(self
            .suites
            .iter()
            .filter(|s| s.project_id == Some(project_id))
            .cloned()
            .collect())
    }

    async fn cases(&self, project_id: u64, suite_id: u64, type_ids: &[u8]) -> Result<Vec<Case>> {
        let endpoint = crate::client::cases_endpoint(project_id, suite_id, type_ids);
        if self.failing_cases {
            return Err(TestRailError::Api {
                endpoint,
                status: 500,
                message: "Internal Server Error".to_string(),
            });
        }
        self.ensure_project(project_id, &endpoint)?;
        let cases = self
            .cases
            .get(&suite_id)
            .ok_or_else(|| not_accessible(&endpoint, "suite_id", "test suite"))?;
        Ok(cases
            .iter()
            .filter(|c| {
                type_ids.is_empty()
                    || c.get("type_id")
                        .and_then(|v| v.as_u64())
                        .is_some_and(|t| type_ids.iter().any(|id| u64::from(*id) == t))
            })
            .cloned()
            .collect())
    }

    async fn sections(&self, project_id: u64, suite_id: u64) -> Result<Vec<Section>> {
        let endpoint = format!("get_sections/{}&suite_id={}", project_id, suite_id);
        self.ensure_project(project_id, &endpoint)?;
        Ok(self.sections.get(&suite_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn typed_case(type_id: u64) -> Case {
        serde_json::from_value(json!({"title": "t", "type_id": type_id, "custom_automation_status": 1}))
            .unwrap()
    }

    fn source() -> MemorySource {
        MemorySource::new()
            .with_project(Project::new(14, "Firefox for iOS"))
            .with_suite(Suite::new(19, 14, "Full Functional"))
            .with_cases(19, vec![typed_case(1), typed_case(3), typed_case(7)])
    }

    #[tokio::test]
    async fn test_type_filter_applies() {
        let src = source();
        assert_eq!(src.cases(14, 19, &[]).await.unwrap().len(), 3);
        assert_eq!(src.cases(14, 19, &[3, 7]).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_project_is_api_error() {
        let err = source().project(99).await.unwrap_err();
        match err {
            TestRailError::Api { status, message, .. } => {
                assert_eq!(status, 400);
                assert!(message.contains("project_id"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_failing_cases() {
        let err = source().failing_cases().cases(14, 19, &[]).await.unwrap_err();
        assert!(matches!(err, TestRailError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_suites_scoped_to_project() {
        let src = source().with_suite(Suite::new(20, 59, "Fenix smoke"));
        let suites = src.suites(14).await.unwrap();
        assert_eq!(suites.len(), 1);
        assert_eq!(suites[0].id, 19);
    }
}
