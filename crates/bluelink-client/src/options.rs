//! Client options
//!
//! Transport settings and overrides that are not part of the account
//! configuration. Can be loaded from TOML/JSON or constructed
//! programmatically.

use std::time::Duration;

use bluelink_core::Endpoints;
use serde::{Deserialize, Serialize};

/// User agent of the vendor's Android app
pub const DEFAULT_USER_AGENT: &str = "okhttp/3.10.0";

/// Options applied when building a session's HTTP transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientOptions {
    /// Whole-request timeout in milliseconds (default: 45 minutes)
    #[serde(default = "default_request_timeout")]
    pub request_ms: u64,

    /// Connect timeout in milliseconds (default: 10s)
    #[serde(default = "default_connect_timeout")]
    pub connect_ms: u64,

    /// `User-Agent` sent on every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Replaces the brand's base URI (mock servers, proxies)
    #[serde(default)]
    pub base_uri: Option<String>,

    /// Endpoint paths
    #[serde(default)]
    pub endpoints: Endpoints,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_ms: default_request_timeout(),
            connect_ms: default_connect_timeout(),
            user_agent: default_user_agent(),
            base_uri: None,
            endpoints: Endpoints::default(),
        }
    }
}

impl ClientOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into().trim_end_matches('/').to_string());
        self
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.request_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_ms)
    }
}

fn default_request_timeout() -> u64 {
    45 * 60 * 1000 // 45 minutes
}

fn default_connect_timeout() -> u64 {
    10_000 // 10s
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ClientOptions::default();
        assert_eq!(options.timeout(), Duration::from_secs(45 * 60));
        assert_eq!(options.connect_timeout(), Duration::from_secs(10));
        assert_eq!(options.user_agent, "okhttp/3.10.0");
        assert_eq!(options.base_uri, None);
    }

    #[test]
    fn test_builder() {
        let options = ClientOptions::default()
            .with_timeout(Duration::from_secs(120))
            .with_base_uri("http://127.0.0.1:9000/");
        assert_eq!(options.request_ms, 120_000);
        assert_eq!(options.base_uri.as_deref(), Some("http://127.0.0.1:9000"));
    }

    #[test]
    fn test_deserialize_partial() {
        let options: ClientOptions = serde_json::from_str(r#"{"request_ms": 5000}"#).unwrap();
        assert_eq!(options.timeout(), Duration::from_secs(5));
        assert_eq!(options.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(options.endpoints, Endpoints::default());
    }
}
