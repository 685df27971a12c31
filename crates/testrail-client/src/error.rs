//! Error types for testrail-client

use thiserror::Error;

/// Errors that can occur while talking to TestRail
#[derive(Error, Debug)]
pub enum TestRailError {
    /// A required credential variable is unset or empty
    #[error("TESTRAIL_USERNAME and TESTRAIL_PASSWORD environment variables must be set ({0} is missing)")]
    MissingCredential(&'static str),

    /// Configuration value could not be interpreted
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// TestRail answered with a non-success status
    #[error("TestRail API error (HTTP {status}) on {endpoint}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// Transport-level failure (connect, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response decoded but did not have the expected structure
    #[error("Unexpected response from {endpoint}: expected {expected}")]
    UnexpectedShape {
        endpoint: String,
        expected: &'static str,
    },
}

impl From<reqwest::Error> for TestRailError {
    fn from(err: reqwest::Error) -> Self {
        TestRailError::Http(err.to_string())
    }
}
