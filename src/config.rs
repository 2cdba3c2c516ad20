//! Connection settings for the weather agent.

use std::time::Duration;

use crate::client::TransportConfig;
use crate::error::{A2AError, A2AResult};

/// Where the agent lives and how to reach it.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Agent base URL, or the JSON-RPC endpoint itself when `discover` is off.
    pub agent_url: String,
    /// Sent as `X-API-Key` on every request when set.
    pub api_key: Option<String>,
    /// Resolve the JSON-RPC endpoint from the agent card.
    pub discover: bool,
    /// Timeout for each unary request.
    pub request_timeout: Duration,
    /// Timeout for establishing a connection.
    pub connect_timeout: Duration,
}

impl AgentConfig {
    /// Settings for `agent_url` with card discovery on and default timeouts.
    pub fn new(agent_url: impl Into<String>) -> Self {
        let defaults = TransportConfig::default();
        Self {
            agent_url: agent_url.into(),
            api_key: None,
            discover: true,
            request_timeout: defaults.request_timeout,
            connect_timeout: defaults.connect_timeout,
        }
    }

    /// Set the API key (builder-style).
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Treat `agent_url` as the JSON-RPC endpoint and skip card discovery.
    pub fn direct(mut self) -> Self {
        self.discover = false;
        self
    }

    /// Check that the agent URL is an absolute http(s) URL.
    pub fn validate(&self) -> A2AResult<()> {
        let url = reqwest::Url::parse(&self.agent_url)
            .map_err(|e| A2AError::Config(format!("invalid agent URL '{}': {e}", self.agent_url)))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(A2AError::Config(format!(
                "agent URL must use http or https, got '{other}'"
            ))),
        }
    }

    /// Transport settings derived from this config.
    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            request_timeout: self.request_timeout,
            connect_timeout: self.connect_timeout,
            api_key: self.api_key.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AgentConfig::new("http://localhost:4000");
        assert!(config.discover);
        assert!(config.api_key.is_none());
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn direct_and_api_key() {
        let config = AgentConfig::new("https://agent.example.com/a2a")
            .with_api_key(Some("k".to_string()))
            .direct();
        assert!(!config.discover);
        assert_eq!(config.transport_config().api_key.as_deref(), Some("k"));
    }

    #[test]
    fn rejects_relative_and_non_http_urls() {
        assert!(matches!(
            AgentConfig::new("localhost:4000/a2a").validate(),
            Err(A2AError::Config(_))
        ));
        assert!(matches!(
            AgentConfig::new("ftp://agent").validate(),
            Err(A2AError::Config(_))
        ));
        assert!(AgentConfig::new("").validate().is_err());
    }
}
