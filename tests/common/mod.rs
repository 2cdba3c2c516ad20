//! Shared test utilities for integration tests.
//!
//! - [`ScriptedTransport`]: a [`Transport`] that answers from a script and
//!   records every request it sees
//! - JSON fixtures for tasks, messages and stream events
//! - [`spawn_agent`]: a small axum weather agent on a random port

#![allow(dead_code)]

use std::collections::VecDeque;
use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use a2a_weather::client::{EventStream, Transport};
use a2a_weather::error::{A2AError, A2AResult};
use a2a_weather::types::{JsonRpcError, JsonRpcId, JsonRpcRequest, JsonRpcResponse, StreamResponse};
use async_trait::async_trait;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

// ============================================================================
// Scripted transport
// ============================================================================

/// Answers `send()` calls in order from a script and hands out one
/// prepared event stream. Every request is recorded.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<A2AResult<JsonRpcResponse>>>,
    events: Mutex<Option<Vec<A2AResult<StreamResponse>>>>,
    requests: Arc<Mutex<Vec<JsonRpcRequest>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful result.
    pub fn reply(self, result: Value) -> Self {
        self.push(Ok(JsonRpcResponse::success(
            Some(JsonRpcId::String("1".to_string())),
            result,
        )))
    }

    /// Queue a JSON-RPC error response.
    pub fn reply_error(self, code: i64, message: &str) -> Self {
        self.push(Ok(JsonRpcResponse::error(
            Some(JsonRpcId::String("1".to_string())),
            JsonRpcError {
                code,
                message: message.to_string(),
                data: None,
            },
        )))
    }

    /// Queue a transport-level failure.
    pub fn fail(self, err: A2AError) -> Self {
        self.push(Err(err))
    }

    /// The events `send_stream()` will replay.
    pub fn with_events(self, events: Vec<A2AResult<StreamResponse>>) -> Self {
        *self.events.lock().unwrap() = Some(events);
        self
    }

    /// Handle on the recorded requests, valid after the transport is boxed.
    pub fn requests(&self) -> Arc<Mutex<Vec<JsonRpcRequest>>> {
        self.requests.clone()
    }

    fn push(self, reply: A2AResult<JsonRpcResponse>) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &JsonRpcRequest) -> A2AResult<JsonRpcResponse> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(A2AError::Transport("script exhausted".to_string())))
    }

    async fn send_stream(&self, request: &JsonRpcRequest) -> A2AResult<EventStream> {
        self.requests.lock().unwrap().push(request.clone());
        match self.events.lock().unwrap().take() {
            Some(events) => Ok(EventStream::from_events(events)),
            None => Err(A2AError::Transport("no stream scripted".to_string())),
        }
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn agent_message_json(id: &str, text: &str) -> Value {
    json!({
        "kind": "message",
        "messageId": id,
        "role": "agent",
        "parts": [{"kind": "text", "text": text}]
    })
}

pub fn user_message_json(id: &str, text: &str) -> Value {
    json!({
        "kind": "message",
        "messageId": id,
        "role": "user",
        "parts": [{"kind": "text", "text": text}]
    })
}

/// A task in `state` whose history ends with an agent message per `replies`.
pub fn task_json(id: &str, state: &str, replies: &[&str]) -> Value {
    let mut history = vec![user_message_json("m-user", "What's the weather in Paris?")];
    for (i, text) in replies.iter().enumerate() {
        history.push(agent_message_json(&format!("m-agent-{i}"), text));
    }
    json!({
        "kind": "task",
        "id": id,
        "contextId": "ctx-1",
        "status": {"state": state},
        "history": history
    })
}

pub fn status_update_json(task_id: &str, state: &str, text: Option<&str>, is_final: bool) -> Value {
    let mut status = json!({"state": state});
    if let Some(text) = text {
        status["message"] = agent_message_json("m-status", text);
    }
    json!({
        "kind": "status-update",
        "taskId": task_id,
        "contextId": "ctx-1",
        "status": status,
        "final": is_final
    })
}

pub fn event(value: Value) -> A2AResult<StreamResponse> {
    Ok(serde_json::from_value(value).unwrap())
}

// ============================================================================
// HTTP weather agent
// ============================================================================

/// What the test agent saw and how it answers.
#[derive(Default)]
pub struct AgentState {
    /// `X-API-Key` of every request, in arrival order (`None` when absent).
    pub api_keys: Mutex<Vec<Option<String>>>,
    /// JSON-RPC bodies received on the endpoint.
    pub rpc_bodies: Mutex<Vec<Value>>,
    /// Card requests served.
    pub card_hits: AtomicUsize,
    /// `tasks/get` calls answered so far.
    pub polls: AtomicUsize,
    /// `tasks/get` answers `working` this many times before completing.
    pub working_polls: usize,
    /// Answer `message/stream` with HTTP 500 instead of an event stream.
    pub stream_fails: bool,
    /// Answer `message/stream` with a JSON-RPC error body instead of an
    /// event stream.
    pub stream_rejects: bool,
    /// Filled in by [`spawn_agent`].
    pub base_url: Mutex<String>,
}

impl AgentState {
    fn record_key(&self, headers: &HeaderMap) {
        let key = headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.api_keys.lock().unwrap().push(key);
    }

    pub fn seen_keys(&self) -> Vec<Option<String>> {
        self.api_keys.lock().unwrap().clone()
    }
}

/// Serve the weather agent on a random local port.
///
/// The card is only served at `card_path`; its `url` points at `/rpc`.
/// Returns the base URL.
pub async fn spawn_agent(state: Arc<AgentState>, card_path: &str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    *state.base_url.lock().unwrap() = base.clone();

    let app = Router::new()
        .route(card_path, get(agent_card))
        .route("/rpc", post(rpc))
        .with_state(state);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    base
}

async fn agent_card(State(state): State<Arc<AgentState>>, headers: HeaderMap) -> Json<Value> {
    state.record_key(&headers);
    state.card_hits.fetch_add(1, Ordering::SeqCst);
    let base = state.base_url.lock().unwrap().clone();
    Json(json!({
        "name": "Weather Agent",
        "description": "Answers questions about the weather",
        "version": "1.0.0",
        "url": format!("{base}/rpc"),
        "preferredTransport": "JSONRPC",
        "capabilities": {"streaming": true}
    }))
}

async fn rpc(
    State(state): State<Arc<AgentState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record_key(&headers);
    state.rpc_bodies.lock().unwrap().push(body.clone());
    let id = body["id"].clone();

    match body["method"].as_str() {
        Some("message/send") => rpc_result(id, task_json("task-1", "submitted", &[])),
        Some("tasks/get") => {
            if body["params"]["id"] != "task-1" {
                return rpc_error(id, -32001, "Task not found");
            }
            let poll = state.polls.fetch_add(1, Ordering::SeqCst);
            if poll < state.working_polls {
                rpc_result(id, task_json("task-1", "working", &[]))
            } else {
                rpc_result(id, task_json("task-1", "completed", &["Sunny, 22°C"]))
            }
        }
        Some("message/stream") if state.stream_fails => {
            (StatusCode::INTERNAL_SERVER_ERROR, "agent exploded").into_response()
        }
        Some("message/stream") if state.stream_rejects => {
            rpc_error(id, -32004, "Streaming not supported")
        }
        Some("message/stream") => {
            let frames = vec![
                json!({"kind": "task", "id": "task-1", "contextId": "ctx-1", "status": {"state": "submitted"}}),
                status_update_json("task-1", "working", Some("It is "), false),
                status_update_json("task-1", "completed", Some("sunny."), true),
            ];
            let events = frames.into_iter().map(move |frame| {
                let data = json!({"jsonrpc": "2.0", "id": id.clone(), "result": frame});
                Ok::<_, Infallible>(Event::default().data(data.to_string()))
            });
            Sse::new(futures::stream::iter(events.collect::<Vec<_>>())).into_response()
        }
        _ => rpc_error(id, -32601, "Method not found"),
    }
}

fn rpc_result(id: Value, result: Value) -> Response {
    Json(json!({"jsonrpc": "2.0", "id": id, "result": result})).into_response()
}

fn rpc_error(id: Value, code: i64, message: &str) -> Response {
    Json(json!({"jsonrpc": "2.0", "id": id, "error": {"code": code, "message": message}}))
        .into_response()
}
