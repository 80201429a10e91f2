//! Client configuration, constructed once at process start.
//!
//! The token is the only required value. It is read from the environment
//! exactly once and carried inside the config object passed to the client
//! constructor, so there is no hidden global state and tests can inject
//! fake credentials.

use crate::defaults;
use crate::error::{Error, Result};

/// Configuration for the NoteHub client.
#[derive(Debug, Clone)]
pub struct NoteHubConfig {
    /// Base URL for the API endpoint.
    pub base_url: String,
    /// Bearer token sent on every request. Required.
    pub token: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl NoteHubConfig {
    /// Create a config with the given token and default endpoint/timeout.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: defaults::BASE_URL.to_string(),
            token: token.into(),
            timeout_seconds: defaults::TIMEOUT_SECS,
        }
    }

    /// Create config from environment variables.
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `NOTEHUB_TOKEN` | (none) | Bearer token. **Required**; absence is fatal |
    /// | `NOTEHUB_BASE_URL` | public NoteHub endpoint | API base URL |
    /// | `NOTEHUB_TIMEOUT_SECS` | `30` | Request timeout (seconds) |
    pub fn from_env() -> Result<Self> {
        Self::from_parts(
            std::env::var("NOTEHUB_TOKEN").ok(),
            std::env::var("NOTEHUB_BASE_URL").ok(),
            std::env::var("NOTEHUB_TIMEOUT_SECS").ok(),
        )
    }

    /// Assemble a config from raw optional values. `from_env` delegates
    /// here; split out so the fail-fast path is testable without touching
    /// process environment.
    pub fn from_parts(
        token: Option<String>,
        base_url: Option<String>,
        timeout_seconds: Option<String>,
    ) -> Result<Self> {
        let token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                Error::Config(
                    "NOTEHUB_TOKEN is missing; set it in the environment or .env".to_string(),
                )
            })?;

        let base_url = base_url.unwrap_or_else(|| defaults::BASE_URL.to_string());

        let timeout_seconds = timeout_seconds
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::TIMEOUT_SECS);

        Ok(Self {
            base_url,
            token,
            timeout_seconds,
        })
    }

    /// Override the base URL (used by tests to point at a local server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_requires_token() {
        let err = NoteHubConfig::from_parts(None, None, None).unwrap_err();
        match err {
            Error::Config(msg) => assert!(msg.contains("NOTEHUB_TOKEN")),
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_from_parts_rejects_blank_token() {
        let result = NoteHubConfig::from_parts(Some("   ".to_string()), None, None);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_from_parts_trims_token() {
        let config =
            NoteHubConfig::from_parts(Some("  secret  ".to_string()), None, None).unwrap();
        assert_eq!(config.token, "secret");
    }

    #[test]
    fn test_from_parts_defaults() {
        let config = NoteHubConfig::from_parts(Some("secret".to_string()), None, None).unwrap();
        assert_eq!(config.base_url, defaults::BASE_URL);
        assert_eq!(config.timeout_seconds, defaults::TIMEOUT_SECS);
    }

    #[test]
    fn test_from_parts_overrides() {
        let config = NoteHubConfig::from_parts(
            Some("secret".to_string()),
            Some("http://localhost:8080/api".to_string()),
            Some("5".to_string()),
        )
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.timeout_seconds, 5);
    }

    #[test]
    fn test_from_parts_ignores_unparseable_timeout() {
        let config = NoteHubConfig::from_parts(
            Some("secret".to_string()),
            None,
            Some("soon".to_string()),
        )
        .unwrap();
        assert_eq!(config.timeout_seconds, defaults::TIMEOUT_SECS);
    }

    #[test]
    fn test_builder_setters() {
        let config = NoteHubConfig::new("secret")
            .with_base_url("http://127.0.0.1:9999")
            .with_timeout(2);
        assert_eq!(config.base_url, "http://127.0.0.1:9999");
        assert_eq!(config.timeout_seconds, 2);
        assert_eq!(config.token, "secret");
    }
}
