//! TestRail REST API v2 client
//!
//! Read-only access to projects, suites, cases and sections. Requests are
//! authenticated with HTTP basic auth using the configured username and
//! password/API key.

use coverage_core::{Case, Section};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::TestRailConfig;
use crate::error::TestRailError;
use crate::models::{Priority, Project, Run, Suite};
use crate::Result;

/// TestRail API client
pub struct TestRailClient {
    config: TestRailConfig,
    http_client: reqwest::Client,
}

impl TestRailClient {
    /// Create a new client
    pub fn new(config: TestRailConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("testrail-coverage/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(TestRailClient {
            config,
            http_client,
        })
    }

    /// Create a client from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(TestRailConfig::from_env()?)
    }

    pub fn config(&self) -> &TestRailConfig {
        &self.config
    }

    /// Issue a GET against an API v2 endpoint and decode the JSON body.
    ///
    /// Non-success statuses become [`TestRailError::Api`] carrying the
    /// `error` message TestRail puts in its response body.
    pub async fn send_get(&self, endpoint: &str) -> Result<Value> {
        let url = self.config.endpoint_url(endpoint);
        debug!(endpoint = %endpoint, "GET TestRail endpoint");

        let response = self
            .http_client
            .get(&url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TestRailError::Api {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn get_one<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let value = self.send_get(endpoint).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn get_list<T: DeserializeOwned>(&self, endpoint: &str, key: &str) -> Result<Vec<T>> {
        let value = self.send_get(endpoint).await?;
        decode_list(endpoint, key, value)
    }

    pub async fn get_project(&self, project_id: u64) -> Result<Project> {
        self.get_one(&format!("get_project/{}", project_id)).await
    }

    pub async fn get_projects(&self) -> Result<Vec<Project>> {
        self.get_list("get_projects", "projects").await
    }

    pub async fn get_suite(&self, suite_id: u64) -> Result<Suite> {
        self.get_one(&format!("get_suite/{}", suite_id)).await
    }

    pub async fn get_suites(&self, project_id: u64) -> Result<Vec<Suite>> {
        self.get_list(&format!("get_suites/{}", project_id), "suites")
            .await
    }

    /// Fetch the cases of a suite, optionally restricted to case types.
    ///
    /// An empty `type_ids` slice applies no type filter.
    pub async fn get_cases(
        &self,
        project_id: u64,
        suite_id: u64,
        type_ids: &[u8],
    ) -> Result<Vec<Case>> {
        self.get_list(&cases_endpoint(project_id, suite_id, type_ids), "cases")
            .await
    }

    pub async fn get_sections(&self, project_id: u64, suite_id: u64) -> Result<Vec<Section>> {
        self.get_list(
            &format!("get_sections/{}&suite_id={}", project_id, suite_id),
            "sections",
        )
        .await
    }

    pub async fn get_runs(&self, project_id: u64) -> Result<Vec<Run>> {
        self.get_list(&format!("get_runs/{}", project_id), "runs")
            .await
    }

    pub async fn get_priorities(&self) -> Result<Vec<Priority>> {
        self.get_list("get_priorities", "priorities").await
    }
}

/// Endpoint path for `get_cases` with the optional `type_id` filter.
pub fn cases_endpoint(project_id: u64, suite_id: u64, type_ids: &[u8]) -> String {
    let mut endpoint = format!("get_cases/{}&suite_id={}", project_id, suite_id);
    if !type_ids.is_empty() {
        let joined: Vec<String> = type_ids.iter().map(u8::to_string).collect();
        endpoint.push_str("&type_id=");
        endpoint.push_str(&joined.join(","));
    }
    endpoint
}

/// Decode a list response.
///
/// Older TestRail versions answer list endpoints with a bare array; newer
/// ones wrap the first page in an object under `key` alongside paging
/// links. Both shapes are accepted; further pages are not followed.
fn decode_list<T: DeserializeOwned>(endpoint: &str, key: &str, value: Value) -> Result<Vec<T>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove(key) {
            Some(Value::Array(items)) => items,
            _ => return Err(unexpected_list(endpoint)),
        },
        _ => return Err(unexpected_list(endpoint)),
    };
    Ok(serde_json::from_value(Value::Array(items))?)
}

fn unexpected_list(endpoint: &str) -> TestRailError {
    TestRailError::UnexpectedShape {
        endpoint: endpoint.to_string(),
        expected: "a JSON array or paged object",
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
