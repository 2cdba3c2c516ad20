//! # a2a-weather: ask an A2A weather agent about a city
//!
//! Two command-line clients for a remote weather agent that speaks the
//! [A2A protocol](https://a2a-protocol.org/latest/specification/) over
//! JSON-RPC 2.0:
//!
//! - `weather` sends one `message/send`. If the agent answers with a
//!   message, that is printed; if it answers with a task, the task is
//!   polled with `tasks/get` until it stops working and its last history
//!   entry is printed.
//! - `weather-stream` sends `message/stream` and prints status-update text
//!   as the Server-Sent Events arrive, until the final event.
//!
//! Both authenticate with an `X-API-Key` header, if one is configured.
//!
//! ## Library use
//!
//! ```no_run
//! use a2a_weather::builders::{weather_question, SendMessageBuilder};
//! use a2a_weather::client::AgentClient;
//! use a2a_weather::config::AgentConfig;
//! use a2a_weather::resolver::{resolve_reply, WaitOptions};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AgentConfig::new("http://localhost:10000")
//!         .with_api_key(std::env::var("A2A_API_KEY").ok());
//!     let client = AgentClient::connect(&config).await?;
//!
//!     let params = SendMessageBuilder::new(weather_question("Lisbon"))
//!         .blocking(true)
//!         .build();
//!     let response = client.send_message(params).await?;
//!
//!     let mut out = std::io::stdout();
//!     let reply = resolve_reply(
//!         &client,
//!         response,
//!         &WaitOptions::default(),
//!         &CancellationToken::new(),
//!         &mut out,
//!     )
//!     .await?;
//!     println!("{}", reply.text());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`client::AgentClient`]: `message/send`, `tasks/get` and
//!   `message/stream` over a [`client::Transport`]
//! - [`client::CardResolver`]: finds the JSON-RPC endpoint from the agent card
//! - [`client::EventStream`]: decoded SSE events
//! - [`resolver`]: polling, stream consumption and the direct/polled branch
//! - [`cli`]: argument parsing and the two run loops
//! - [`error::A2AError`]: JSON-RPC errors plus client-side failures

pub mod builders;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod resolver;
pub mod types;
pub mod utils;

pub use error::{A2AError, A2AResult};
