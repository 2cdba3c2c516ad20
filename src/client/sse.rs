//! Server-Sent Events stream handling for `message/stream`.
//!
//! SSE framing (event boundaries, multi-line `data:` fields, comments) is
//! handled by `reqwest-eventsource`. This module decodes each event's data
//! into a [`StreamResponse`], unwrapping the JSON-RPC envelope agents put
//! around it.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::{self, Stream, StreamExt};
use reqwest_eventsource::{retry, Event, EventSource};

use crate::error::{A2AError, A2AResult};
use crate::types::{JsonRpcResponse, StreamResponse};

/// A stream of A2A server-sent events.
///
/// Yields events in arrival order. The stream ends when the server closes
/// the connection; the first error is yielded once and ends it too.
/// Dropping the stream closes the connection, so a consumer that stops at
/// the final event never reads past it.
///
/// # Example
///
/// ```no_run
/// # async fn example(mut stream: a2a_weather::client::EventStream) {
/// while let Some(event) = stream.next().await {
///     match event {
///         Ok(response) => println!("Got event: {:?}", response),
///         Err(e) => eprintln!("Stream error: {}", e),
///     }
/// }
/// # }
/// ```
pub struct EventStream {
    inner: Pin<Box<dyn Stream<Item = A2AResult<StreamResponse>> + Send>>,
}

impl std::fmt::Debug for EventStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStream").finish_non_exhaustive()
    }
}

impl EventStream {
    /// Wrap any stream of decoded events.
    ///
    /// Custom [`Transport`](super::Transport) implementations use this to
    /// hand back their own event sources.
    pub fn new<S>(events: S) -> Self
    where
        S: Stream<Item = A2AResult<StreamResponse>> + Send + 'static,
    {
        Self {
            inner: Box::pin(events),
        }
    }

    /// A stream that replays a fixed list of events.
    pub fn from_events(events: Vec<A2AResult<StreamResponse>>) -> Self {
        Self::new(stream::iter(events))
    }

    /// Send `request` and wait for the SSE connection to open.
    ///
    /// HTTP-level failures (non-2xx status, a JSON error body instead of an
    /// event stream) are returned here rather than as the first event.
    /// Reconnection is disabled: a closed stream is final.
    pub(crate) async fn connect(request: reqwest::RequestBuilder) -> A2AResult<Self> {
        let mut source = EventSource::new(request)
            .map_err(|e| A2AError::Transport(format!("cannot build stream request: {e}")))?;
        source.set_retry_policy(Box::new(retry::Never));

        let first = match source.next().await {
            Some(Ok(Event::Open)) => None,
            Some(Ok(Event::Message(message))) => Some(message),
            Some(Err(err)) => return Err(stream_error(err).await),
            None => {
                return Err(A2AError::Transport(
                    "event stream closed before it opened".to_string(),
                ))
            }
        };

        let mut events = stream::iter(first.map(|m| Ok(Event::Message(m)))).chain(source);

        let decoded = async_stream::stream! {
            while let Some(event) = events.next().await {
                match event {
                    Ok(Event::Open) => {}
                    Ok(Event::Message(message)) => match decode_event_data(&message.data) {
                        Ok(Some(response)) => yield Ok(response),
                        Ok(None) => {}
                        Err(e) => {
                            yield Err(e);
                            break;
                        }
                    },
                    Err(reqwest_eventsource::Error::StreamEnded) => break,
                    Err(err) => {
                        yield Err(stream_error(err).await);
                        break;
                    }
                }
            }
        };

        Ok(Self::new(decoded))
    }

    /// Get the next event from the stream.
    ///
    /// Returns `None` when the server has closed the stream.
    pub async fn next(&mut self) -> Option<A2AResult<StreamResponse>> {
        StreamExt::next(self).await
    }
}

impl Stream for EventStream {
    type Item = A2AResult<StreamResponse>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

/// Map an event-source failure onto [`A2AError`].
async fn stream_error(err: reqwest_eventsource::Error) -> A2AError {
    use reqwest_eventsource::Error;

    match err {
        Error::InvalidStatusCode(status, response) => A2AError::Http {
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        },
        Error::InvalidContentType(content_type, response) => {
            // Agents reject a stream request with a plain JSON-RPC error body.
            let body = response.text().await.unwrap_or_default();
            match serde_json::from_str::<JsonRpcResponse>(&body) {
                Ok(JsonRpcResponse {
                    error: Some(error), ..
                }) => error.into(),
                _ => A2AError::Transport(format!(
                    "expected text/event-stream, got {content_type:?}"
                )),
            }
        }
        Error::Transport(e) if e.is_timeout() => {
            A2AError::Timeout(format!("SSE stream timed out: {e}"))
        }
        Error::Transport(e) => A2AError::Transport(format!("error reading SSE stream: {e}")),
        other => A2AError::Transport(format!("malformed SSE stream: {other}")),
    }
}

/// Decode the data of one SSE event.
///
/// Returns `Ok(None)` for payloads that carry no event (empty data, the
/// `[DONE]` sentinel).
///
/// Handles two formats:
/// 1. **JSON-RPC wrapped**: `{"jsonrpc": "2.0", "id": ..., "result": {...}}`,
///    as most A2A servers send it. An `error` member becomes
///    [`A2AError::JsonRpc`].
/// 2. **Raw events**: the data is a `StreamResponse` directly.
pub(crate) fn decode_event_data(data: &str) -> A2AResult<Option<StreamResponse>> {
    let data = data.trim();
    if data.is_empty() || data == "[DONE]" {
        return Ok(None);
    }

    let value: serde_json::Value = serde_json::from_str(data).map_err(|e| {
        A2AError::InvalidJson(format!("failed to parse SSE event data: {e} (data: {data})"))
    })?;

    let event_value = if value.get("jsonrpc").is_some() {
        let envelope: JsonRpcResponse = serde_json::from_value(value).map_err(|e| {
            A2AError::InvalidJson(format!("malformed JSON-RPC SSE frame: {e} (data: {data})"))
        })?;
        if let Some(error) = envelope.error {
            return Err(error.into());
        }
        envelope.result.ok_or_else(|| {
            A2AError::InvalidJson(format!(
                "JSON-RPC SSE response has neither 'result' nor 'error': {data}"
            ))
        })?
    } else {
        value
    };

    serde_json::from_value(event_value).map(Some).map_err(|e| {
        A2AError::InvalidJson(format!(
            "failed to parse SSE event as StreamResponse: {e} (data: {data})"
        ))
    })
}
