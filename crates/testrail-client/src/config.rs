//! TestRail connection settings.

use std::fmt;
use std::time::Duration;

use crate::error::TestRailError;
use crate::Result;

/// Default TestRail instance.
pub const DEFAULT_HOST: &str = "https://testrail.stage.mozaws.net";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_HOST: &str = "TESTRAIL_HOST";
pub const ENV_USERNAME: &str = "TESTRAIL_USERNAME";
pub const ENV_PASSWORD: &str = "TESTRAIL_PASSWORD";
pub const ENV_TIMEOUT_SECS: &str = "TESTRAIL_TIMEOUT_SECS";

/// TestRail configuration
#[derive(Clone)]
pub struct TestRailConfig {
    /// Instance URL, without trailing slash
    pub base_url: String,
    /// Account e-mail
    pub username: String,
    /// Password or API key
    pub password: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl TestRailConfig {
    /// Create a config for a specific instance.
    pub fn new(base_url: &str, username: &str, password: &str) -> Self {
        TestRailConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Read configuration from the process environment.
    ///
    /// Fails fast when either credential variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let username = get(ENV_USERNAME).ok_or(TestRailError::MissingCredential(ENV_USERNAME))?;
        let password = get(ENV_PASSWORD).ok_or(TestRailError::MissingCredential(ENV_PASSWORD))?;
        let host = get(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string());

        let mut config = TestRailConfig::new(&host, &username, &password);
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                TestRailError::InvalidConfig(format!(
                    "{} must be an integer, got {:?}",
                    ENV_TIMEOUT_SECS, raw
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL for an API v2 endpoint such as `get_project/14`.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/index.php?/api/v2/{}", self.base_url, endpoint)
    }
}

impl fmt::Debug for TestRailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestRailConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_defaults_host() {
        let config = TestRailConfig::from_lookup(lookup(&[
            (ENV_USERNAME, "qa@example.com"),
            (ENV_PASSWORD, "key"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, DEFAULT_HOST);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_missing_username_fails_fast() {
        let err = TestRailConfig::from_lookup(lookup(&[(ENV_PASSWORD, "key")])).unwrap_err();
        assert!(matches!(err, TestRailError::MissingCredential(ENV_USERNAME)));
    }

    #[test]
    fn test_empty_password_counts_as_missing() {
        let err = TestRailConfig::from_lookup(lookup(&[
            (ENV_USERNAME, "qa@example.com"),
            (ENV_PASSWORD, "  "),
        ]))
        .unwrap_err();
        assert!(matches!(err, TestRailError::MissingCredential(ENV_PASSWORD)));
    }

    #[test]
    fn test_host_and_timeout_overrides() {
        let config = TestRailConfig::from_lookup(lookup(&[
            (ENV_USERNAME, "u"),
            (ENV_PASSWORD, "p"),
            (ENV_HOST, "https://testrail.example.org/"),
            (ENV_TIMEOUT_SECS, "5"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://testrail.example.org");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(
            config.endpoint_url("get_suite/19"),
            "https://testrail.example.org/index.php?/api/v2/get_suite/19"
        );
    }

    #[test]
    fn test_bad_timeout_rejected() {
        let err = TestRailConfig::from_lookup(lookup(&[
            (ENV_USERNAME, "u"),
            (ENV_PASSWORD, "p"),
            (ENV_TIMEOUT_SECS, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, TestRailError::InvalidConfig(_)));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = TestRailConfig::new("https://x", "u", "hunter2");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}
