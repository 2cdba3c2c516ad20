//! Command-line front ends for the `weather` and `weather-stream` binaries.
//!
//! Both take a city name and the agent settings (flags or `A2A_*`
//! environment variables). Usage errors exit with code 1; so does any
//! failure while talking to the agent.

use std::io::Write;
use std::time::Duration;

use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Parser};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use crate::builders::{weather_question, SendMessageBuilder};
use crate::client::AgentClient;
use crate::config::AgentConfig;
use crate::error::{code_name, A2AError, A2AResult};
use crate::resolver::{consume_stream, resolve_reply, WaitContext, WaitOptions};

/// Agent connection flags shared by both binaries.
#[derive(Args, Debug, Clone)]
pub struct AgentArgs {
    /// Agent base URL; the JSON-RPC endpoint is read from its agent card.
    #[arg(long, env = "A2A_AGENT_URL")]
    pub agent_url: String,

    /// API key sent as the X-API-Key header.
    #[arg(long, env = "A2A_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Treat the agent URL as the JSON-RPC endpoint (skip agent card discovery).
    #[arg(long)]
    pub direct: bool,

    /// Give up waiting for the agent's answer after this many seconds.
    #[arg(long, env = "A2A_WAIT_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Timeout for a single JSON-RPC call, in seconds.
    #[arg(
        long,
        env = "A2A_REQUEST_TIMEOUT_SECS",
        default_value_t = 300,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub request_timeout_secs: u64,
}

impl AgentArgs {
    /// Connection settings for [`AgentClient::connect`].
    pub fn config(&self) -> AgentConfig {
        let mut config = AgentConfig::new(&self.agent_url).with_api_key(self.api_key.clone());
        if self.direct {
            config = config.direct();
        }
        config.request_timeout = Duration::from_secs(self.request_timeout_secs);
        config
    }

    fn wait_options(&self, poll_interval: Duration) -> WaitOptions {
        let options = WaitOptions::default().with_poll_interval(poll_interval);
        match self.timeout_secs {
            Some(secs) => options.with_deadline(Duration::from_secs(secs)),
            None => options,
        }
    }
}

/// Ask the weather agent about a city and wait for the answer.
#[derive(Parser, Debug)]
#[command(name = "weather", version, about = "Ask the A2A weather agent about a city")]
pub struct WeatherCli {
    /// City to ask about; several words are joined with spaces.
    #[arg(value_name = "City Name", required = true, num_args = 1.., value_parser = NonEmptyStringValueParser::new())]
    pub city: Vec<String>,

    #[command(flatten)]
    pub agent: AgentArgs,

    /// Milliseconds between two task status checks.
    #[arg(
        long,
        env = "A2A_POLL_INTERVAL_MS",
        default_value_t = 10_000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub poll_interval_ms: u64,
}

impl WeatherCli {
    /// The city as one string.
    pub fn city(&self) -> String {
        self.city.join(" ")
    }

    /// Poll interval and deadline for the task wait.
    pub fn wait_options(&self) -> WaitOptions {
        self.agent
            .wait_options(Duration::from_millis(self.poll_interval_ms))
    }
}

/// Stream the weather agent's answer about a city as it is produced.
#[derive(Parser, Debug)]
#[command(
    name = "weather-stream",
    version,
    about = "Stream the A2A weather agent's answer about a city"
)]
pub struct StreamCli {
    /// City to ask about; several words are joined with spaces.
    #[arg(value_name = "City Name", required = true, num_args = 1.., value_parser = NonEmptyStringValueParser::new())]
    pub city: Vec<String>,

    #[command(flatten)]
    pub agent: AgentArgs,
}

impl StreamCli {
    /// The city as one string.
    pub fn city(&self) -> String {
        self.city.join(" ")
    }

    /// Deadline for the stream; the poll interval is unused.
    pub fn wait_options(&self) -> WaitOptions {
        self.agent
            .wait_options(crate::resolver::DEFAULT_POLL_INTERVAL)
    }
}

/// Blocking mode: `message/send`, then poll the task if one was created.
pub async fn run_weather<W>(cli: &WeatherCli, cancel: &CancellationToken, out: &mut W) -> A2AResult<()>
where
    W: Write + ?Sized,
{
    let city = cli.city();
    let guard = WaitContext::start(&WaitOptions::default(), cancel);

    writeln!(out, "📡 Asking for weather in {city}…")?;
    out.flush()?;

    let client = guard
        .run("connecting to the agent", AgentClient::connect(&cli.agent.config()))
        .await?;
    let params = SendMessageBuilder::new(weather_question(&city))
        .blocking(true)
        .build();
    let response = guard
        .run("sending the message", client.send_message(params))
        .await?;

    let reply = resolve_reply(&client, response, &cli.wait_options(), cancel, out).await?;
    writeln!(out, "🌤  Agent says: {}", reply.text())?;
    Ok(())
}

/// Streaming mode: `message/stream`, printing text until the final event.
pub async fn run_weather_stream<W>(
    cli: &StreamCli,
    cancel: &CancellationToken,
    out: &mut W,
) -> A2AResult<()>
where
    W: Write + ?Sized,
{
    let city = cli.city();
    let guard = WaitContext::start(&WaitOptions::default(), cancel);

    writeln!(out, "📡 Streaming weather for {city}…")?;
    out.flush()?;

    let client = guard
        .run("connecting to the agent", AgentClient::connect(&cli.agent.config()))
        .await?;
    if let Some(card) = client.agent_card() {
        if card.capabilities.streaming == Some(false) {
            tracing::warn!(agent = %card.name, "agent card says streaming is not supported");
        }
    }

    let params = SendMessageBuilder::new(weather_question(&city)).build();
    let mut events = guard
        .run("opening the stream", client.send_message_stream(params))
        .await?;

    let summary = consume_stream(&mut events, &cli.wait_options(), cancel, out).await?;
    tracing::debug!(events = summary.events, task_id = ?summary.task_id, "stream finished");
    if !summary.finished {
        tracing::warn!(events = summary.events, "stream closed before a final status update");
    }
    Ok(())
}

/// Parse arguments, exiting with code 1 on a usage error.
///
/// `--help` and `--version` print to stdout and exit with code 0.
pub fn parse_or_exit<P: Parser>() -> P {
    P::try_parse().unwrap_or_else(|err| {
        let code = if err.use_stderr() { 1 } else { 0 };
        let _ = err.print();
        std::process::exit(code);
    })
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the `warn` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// A token that is cancelled on Ctrl-C.
pub fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("interrupted");
            trigger.cancel();
        }
    });
    token
}

/// The line printed on stderr when a run fails.
pub fn error_line(err: &A2AError) -> String {
    match err {
        A2AError::JsonRpc { code, message, .. } => match code_name(*code) {
            Some(name) => format!("❌ RPC error: {message} ({name}, code {code})"),
            None => format!("❌ RPC error: {message} (code {code})"),
        },
        other => format!("⚠️ Error: {other}"),
    }
}
