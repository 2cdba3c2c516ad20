//! A2A client: call a remote agent over JSON-RPC and SSE.
//!
//! - [`AgentClient`]: typed `message/send`, `tasks/get` and `message/stream`
//! - [`CardResolver`]: find the JSON-RPC endpoint from the agent card
//! - [`Transport`] / [`JsonRpcTransport`]: pluggable transport layer
//! - [`EventStream`]: decoded SSE events of a streaming response
//! - [`auth`]: `X-API-Key` header injection
//!
//! # Quick Start
//!
//! ```no_run
//! use a2a_weather::builders::SendMessageBuilder;
//! use a2a_weather::client::AgentClient;
//! use a2a_weather::config::AgentConfig;
//! use a2a_weather::types::SendMessageResponse;
//!
//! # async fn example() -> a2a_weather::A2AResult<()> {
//! let client = AgentClient::connect(&AgentConfig::new("http://localhost:4000")).await?;
//!
//! let params = SendMessageBuilder::new("What's the weather in Rome?").blocking(true).build();
//! match client.send_message(params).await? {
//!     SendMessageResponse::Task(task) => println!("Task {} ({})", task.id, task.status.state),
//!     SendMessageResponse::Message(msg) => println!("Direct reply: {:?}", msg),
//! }
//! # Ok(())
//! # }
//! ```

mod agent_client;
pub mod auth;
mod card_resolver;
mod sse;
mod transport;

pub use agent_client::{AgentClient, POLL_HISTORY_LENGTH};
pub use card_resolver::{CardResolver, AGENT_CARD_PATH, LEGACY_AGENT_CARD_PATH};
pub use sse::EventStream;
pub use transport::{JsonRpcTransport, Transport, TransportConfig};
