//! Typed client for the three A2A RPCs the weather programs use.

use serde::Serialize;

use crate::config::AgentConfig;
use crate::error::{A2AError, A2AResult};
use crate::types::{
    AgentCard, GetTaskParams, JsonRpcRequest, JsonRpcResponse, SendMessageParams,
    SendMessageResponse, Task,
};

use super::card_resolver::CardResolver;
use super::sse::EventStream;
use super::transport::{JsonRpcTransport, Transport};

/// History entries requested from `tasks/get` while polling.
pub const POLL_HISTORY_LENGTH: i32 = 100;

/// Client for an A2A agent.
///
/// Wraps a [`Transport`] and exposes:
/// - `message/send`: [`send_message`](Self::send_message)
/// - `tasks/get`: [`get_task`](Self::get_task)
/// - `message/stream`: [`send_message_stream`](Self::send_message_stream)
///
/// # Construction
///
/// ```no_run
/// use a2a_weather::client::AgentClient;
/// use a2a_weather::config::AgentConfig;
///
/// # async fn example() -> a2a_weather::A2AResult<()> {
/// // Resolve the endpoint from the agent card, sending an API key:
/// let config = AgentConfig::new("http://localhost:4000").with_api_key(Some("secret".into()));
/// let client = AgentClient::connect(&config).await?;
/// # Ok(())
/// # }
/// ```
pub struct AgentClient {
    transport: Box<dyn Transport>,
    agent_card: Option<AgentCard>,
}

impl std::fmt::Debug for AgentClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentClient")
            .field("agent_card", &self.agent_card)
            .finish_non_exhaustive()
    }
}

impl AgentClient {
    /// Connect as described by `config`.
    ///
    /// Builds one header-injecting HTTP client and uses it for both card
    /// discovery and the JSON-RPC transport.
    ///
    /// # Errors
    ///
    /// Returns [`A2AError::Config`] for an unusable URL or API key, and any
    /// discovery error when the card cannot be fetched or has no JSON-RPC
    /// endpoint.
    pub async fn connect(config: &AgentConfig) -> A2AResult<Self> {
        config.validate()?;
        let transport_config = config.transport_config();
        let http = transport_config.http_client()?;

        if !config.discover {
            tracing::debug!(endpoint = %config.agent_url, "using agent URL as JSON-RPC endpoint");
            let transport = JsonRpcTransport::with_client(
                &config.agent_url,
                http,
                transport_config.request_timeout,
            );
            return Ok(Self::with_transport(Box::new(transport)));
        }

        let card = CardResolver::new(http.clone())
            .resolve(&config.agent_url)
            .await?;
        let endpoint = CardResolver::jsonrpc_url(&card).ok_or_else(|| {
            A2AError::Config(format!(
                "agent card for '{}' has no JSONRPC interface",
                card.name
            ))
        })?;
        tracing::info!(agent = %card.name, endpoint = %endpoint, "resolved agent card");

        let transport = JsonRpcTransport::with_client(endpoint, http, transport_config.request_timeout);
        Ok(Self {
            transport: Box::new(transport),
            agent_card: Some(card),
        })
    }

    /// Create a client with a custom transport.
    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            agent_card: None,
        }
    }

    /// The agent card, if the client was built through discovery.
    pub fn agent_card(&self) -> Option<&AgentCard> {
        self.agent_card.as_ref()
    }

    /// Send a message to the agent (`message/send`).
    ///
    /// The agent answers with either a direct [`Message`](crate::types::Message)
    /// or a [`Task`] to be polled with [`get_task()`](Self::get_task).
    pub async fn send_message(&self, params: SendMessageParams) -> A2AResult<SendMessageResponse> {
        let request = build_request("message/send", &params)?;
        let response = self.transport.send(&request).await?;
        parse_result(response)
    }

    /// Get the current state of a task (`tasks/get`).
    pub async fn get_task(&self, params: GetTaskParams) -> A2AResult<Task> {
        let request = build_request("tasks/get", &params)?;
        let response = self.transport.send(&request).await?;
        parse_result(response)
    }

    /// Convenience: get a task by ID with optional history length.
    pub async fn get_task_by_id(&self, task_id: &str, history_length: Option<i32>) -> A2AResult<Task> {
        self.get_task(GetTaskParams {
            id: task_id.to_string(),
            history_length,
        })
        .await
    }

    /// Send a message with streaming (`message/stream`).
    ///
    /// Returns an SSE stream of [`crate::types::StreamResponse`] events.
    pub async fn send_message_stream(&self, params: SendMessageParams) -> A2AResult<EventStream> {
        let request = build_request("message/stream", &params)?;
        self.transport.send_stream(&request).await
    }
}

// ──────────────────────────────────────────────────
// Internal helpers
// ──────────────────────────────────────────────────

fn build_request(method: &str, params: &impl Serialize) -> A2AResult<JsonRpcRequest> {
    let params = serde_json::to_value(params)
        .map_err(|e| A2AError::Transport(format!("failed to serialize request params: {e}")))?;
    Ok(JsonRpcRequest::new(method, params))
}

/// Parse the `result` field from a JSON-RPC response into the expected type.
///
/// If the response contains an error, converts it into an [`A2AError::JsonRpc`].
fn parse_result<T: serde::de::DeserializeOwned>(response: JsonRpcResponse) -> A2AResult<T> {
    if let Some(error) = response.error {
        return Err(error.into());
    }

    let result = response.result.ok_or_else(|| {
        A2AError::InvalidJson("JSON-RPC response has neither 'result' nor 'error'".to_string())
    })?;

    serde_json::from_value(result)
        .map_err(|e| A2AError::InvalidJson(format!("failed to deserialize response result: {e}")))
}
