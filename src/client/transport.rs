//! Transport layer for A2A client communication.
//!
//! Provides the `Transport` trait for abstracting over how JSON-RPC requests
//! reach the agent, and `JsonRpcTransport` for the standard JSON-RPC over
//! HTTP binding.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{A2AError, A2AResult};
use crate::types::{JsonRpcRequest, JsonRpcResponse};

use super::auth::{api_key_headers, http_client};
use super::sse::EventStream;

/// Transport abstraction for A2A communication.
///
/// Implementations handle the low-level details of sending JSON-RPC requests
/// and receiving responses (or SSE streams). Tests swap in scripted
/// implementations.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a JSON-RPC request and receive a JSON-RPC response.
    async fn send(&self, request: &JsonRpcRequest) -> A2AResult<JsonRpcResponse>;

    /// Send a JSON-RPC request and receive an SSE event stream.
    ///
    /// Used for `message/stream`.
    async fn send_stream(&self, request: &JsonRpcRequest) -> A2AResult<EventStream>;
}

/// Configuration for [`JsonRpcTransport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Timeout for each unary request. Streams are not bounded by it.
    /// Defaults to 60 seconds.
    pub request_timeout: Duration,
    /// Timeout for establishing a connection. Defaults to 10 seconds.
    pub connect_timeout: Duration,
    /// API key sent as `X-API-Key` on every request, if set.
    pub api_key: Option<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            api_key: None,
        }
    }
}

impl TransportConfig {
    /// Set the API key (builder-style).
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Build the header-injecting HTTP client described by this config.
    pub fn http_client(&self) -> A2AResult<reqwest::Client> {
        let headers = api_key_headers(self.api_key.as_deref())?;
        http_client(headers, self.connect_timeout)
    }
}

/// JSON-RPC over HTTP transport using `reqwest`.
///
/// Sends POST requests with `Content-Type: application/json` and parses the
/// response as a JSON-RPC result or error. For streaming methods, the
/// response is read as a Server-Sent Events stream.
///
/// # Example
///
/// ```no_run
/// use a2a_weather::client::{JsonRpcTransport, TransportConfig};
///
/// # fn example() -> a2a_weather::A2AResult<()> {
/// let config = TransportConfig::default().with_api_key("secret");
/// let transport = JsonRpcTransport::with_config("http://localhost:4000/a2a", config)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct JsonRpcTransport {
    client: reqwest::Client,
    url: String,
    request_timeout: Duration,
}

impl JsonRpcTransport {
    /// Create a transport with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`A2AError::Config`] if the API key is not a valid header value.
    pub fn with_config(url: impl Into<String>, config: TransportConfig) -> A2AResult<Self> {
        let client = config.http_client()?;
        Ok(Self::with_client(url, client, config.request_timeout))
    }

    /// Create a transport around an existing `reqwest::Client`.
    ///
    /// Use this to share one header-injecting client between card
    /// discovery and RPC calls.
    pub fn with_client(
        url: impl Into<String>,
        client: reqwest::Client,
        request_timeout: Duration,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            request_timeout,
        }
    }

    /// Returns the URL this transport sends requests to.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn post(&self, request: &JsonRpcRequest) -> A2AResult<reqwest::RequestBuilder> {
        let body = serde_json::to_vec(request).map_err(|e| {
            A2AError::Transport(format!("failed to serialize JSON-RPC request: {e}"))
        })?;
        Ok(self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body))
    }
}

#[async_trait]
impl Transport for JsonRpcTransport {
    async fn send(&self, request: &JsonRpcRequest) -> A2AResult<JsonRpcResponse> {
        tracing::debug!(method = %request.method, url = %self.url, "sending JSON-RPC request");

        let response = self
            .post(request)?
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    A2AError::Timeout(format!("request timed out: {e}"))
                } else if e.is_connect() {
                    A2AError::Transport(format!("connection failed: {e}"))
                } else {
                    A2AError::Transport(format!("HTTP request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(A2AError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| A2AError::Transport(format!("failed to read response body: {e}")))?;

        serde_json::from_slice(&bytes).map_err(|e| {
            A2AError::InvalidJson(format!("failed to parse JSON-RPC response: {e}"))
        })
    }

    async fn send_stream(&self, request: &JsonRpcRequest) -> A2AResult<EventStream> {
        tracing::debug!(method = %request.method, url = %self.url, "opening SSE stream");

        let builder = self
            .post(request)?
            .header(reqwest::header::ACCEPT, "text/event-stream");
        EventStream::connect(builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = TransportConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn builder_style_config() {
        let config = TransportConfig::default().with_api_key("k");
        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert!(config.http_client().is_ok());
    }

    #[test]
    fn api_key_with_newline_is_rejected() {
        let config = TransportConfig::default().with_api_key("bad\nkey");
        assert!(matches!(config.http_client(), Err(A2AError::Config(_))));
    }

    #[test]
    fn transport_keeps_url() {
        let transport =
            JsonRpcTransport::with_config("http://localhost:4000/a2a", TransportConfig::default())
                .unwrap();
        assert_eq!(transport.url(), "http://localhost:4000/a2a");
    }
}
