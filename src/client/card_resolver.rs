//! Agent card discovery.
//!
//! The agent URL handed to the CLI is a base URL. The JSON-RPC endpoint is
//! read from the agent card served under `/.well-known/`.

use crate::error::{A2AError, A2AResult};
use crate::types::AgentCard;

/// Well-known path of the agent card (A2A v0.3+).
pub const AGENT_CARD_PATH: &str = "/.well-known/agent-card.json";

/// Well-known path used by agents built before v0.3.
pub const LEGACY_AGENT_CARD_PATH: &str = "/.well-known/agent.json";

const JSONRPC_TRANSPORT: &str = "JSONRPC";

/// Resolves [`AgentCard`]s from agent base URLs.
///
/// # Example
///
/// ```no_run
/// use a2a_weather::client::CardResolver;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let resolver = CardResolver::new(reqwest::Client::new());
/// let card = resolver.resolve("http://localhost:4000").await?;
/// println!("Agent: {} at {}", card.name, card.url);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CardResolver {
    client: reqwest::Client,
}

impl CardResolver {
    /// Create a resolver that fetches through `client`.
    ///
    /// Pass the same header-injecting client the transport uses so that
    /// protected cards are reachable.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetch and parse the agent card for `base_url`.
    ///
    /// Tries [`AGENT_CARD_PATH`] first and falls back to
    /// [`LEGACY_AGENT_CARD_PATH`] on a 404.
    ///
    /// # Errors
    ///
    /// Returns [`A2AError::Transport`] on connection failures, [`A2AError::Http`]
    /// on non-2xx responses, and [`A2AError::InvalidJson`] on parse failures.
    pub async fn resolve(&self, base_url: &str) -> A2AResult<AgentCard> {
        let base = base_url.trim_end_matches('/');

        match self.fetch_card(base, AGENT_CARD_PATH).await {
            Err(A2AError::Http { status: 404, .. }) => {
                tracing::debug!(
                    "agent card not found at {}{}, trying {}",
                    base,
                    AGENT_CARD_PATH,
                    LEGACY_AGENT_CARD_PATH,
                );
                self.fetch_card(base, LEGACY_AGENT_CARD_PATH).await
            }
            other => other,
        }
    }

    async fn fetch_card(&self, base: &str, path: &str) -> A2AResult<AgentCard> {
        let url = format!("{base}{path}");
        tracing::debug!("resolving agent card from {}", url);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    A2AError::Transport(format!("failed to connect to agent at {url}: {e}"))
                } else if e.is_timeout() {
                    A2AError::Timeout(format!("timed out fetching agent card from {url}: {e}"))
                } else {
                    A2AError::Transport(format!("failed to fetch agent card from {url}: {e}"))
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
            .map_err(|e| A2AError::Transport(format!("failed to read agent card response: {e}")))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| A2AError::InvalidJson(format!("failed to parse agent card: {e}")))
    }

    /// Extract the JSON-RPC endpoint URL from an agent card.
    ///
    /// The card's main `url` speaks `preferredTransport` (JSON-RPC when
    /// absent). Otherwise the first JSON-RPC entry of
    /// `additionalInterfaces` is used. Transport names compare
    /// case-insensitively.
    pub fn jsonrpc_url(card: &AgentCard) -> Option<&str> {
        let preferred = card
            .preferred_transport
            .as_deref()
            .unwrap_or(JSONRPC_TRANSPORT);
        if preferred.eq_ignore_ascii_case(JSONRPC_TRANSPORT) {
            return Some(card.url.as_str());
        }
        card.additional_interfaces
            .iter()
            .find(|iface| iface.transport.eq_ignore_ascii_case(JSONRPC_TRANSPORT))
            .map(|iface| iface.url.as_str())
    }
}
