//! Consuming `message/stream` events.

mod common;

use std::time::Duration;

use a2a_weather::builders::SendMessageBuilder;
use a2a_weather::client::{AgentClient, EventStream};
use a2a_weather::error::{A2AError, A2AResult};
use a2a_weather::resolver::{consume_stream, WaitOptions};
use a2a_weather::types::StreamResponse;
use common::{agent_message_json, event, status_update_json, ScriptedTransport};
use serde_json::json;
use tokio_util::sync::CancellationToken;

fn task_event(id: &str) -> A2AResult<StreamResponse> {
    event(json!({"kind": "task", "id": id, "contextId": "ctx-1", "status": {"state": "submitted"}}))
}

fn status(text: Option<&str>, is_final: bool) -> A2AResult<StreamResponse> {
    let state = if is_final { "completed" } else { "working" };
    event(status_update_json("t-1", state, text, is_final))
}

async fn consume(
    events: &mut EventStream,
    out: &mut Vec<u8>,
) -> A2AResult<a2a_weather::resolver::StreamSummary> {
    consume_stream(events, &WaitOptions::default(), &CancellationToken::new(), out).await
}

// ============================================================================
// Happy path
// ============================================================================

#[tokio::test]
async fn test_prints_chunks_and_stops_at_final() {
    let mut events = EventStream::from_events(vec![
        task_event("t-1"),
        status(Some("A"), false),
        status(Some("B"), true),
        status(Some("C"), false),
    ]);
    let mut out: Vec<u8> = Vec::new();

    let summary = consume(&mut events, &mut out).await.unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "🛠  Task created: t-1\nAB\n✅ Done streaming.\n"
    );
    assert_eq!(summary.text, "AB");
    assert_eq!(summary.task_id.as_deref(), Some("t-1"));
    assert_eq!(summary.events, 3);

    // The event after the final one is left unread.
    match events.next().await {
        Some(Ok(StreamResponse::StatusUpdate(update))) => {
            assert!(!update.r#final);
        }
        other => panic!("expected the trailing status update, got {other:?}"),
    }
}

#[tokio::test]
async fn test_status_without_message_prints_nothing() {
    let mut events = EventStream::from_events(vec![
        status(None, false),
        status(Some("Dry"), false),
        status(None, true),
    ]);
    let mut out: Vec<u8> = Vec::new();

    let summary = consume(&mut events, &mut out).await.unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "Dry\n✅ Done streaming.\n");
    assert!(summary.task_id.is_none());
}

#[tokio::test]
async fn test_artifact_updates_are_skipped() {
    let artifact = event(json!({
        "kind": "artifact-update",
        "taskId": "t-1",
        "contextId": "ctx-1",
        "artifact": {"artifactId": "a-1", "parts": [{"kind": "text", "text": "ignored"}]}
    }));
    let mut events = EventStream::from_events(vec![
        status(Some("Hail"), false),
        artifact,
        status(None, true),
    ]);
    let mut out: Vec<u8> = Vec::new();

    let summary = consume(&mut events, &mut out).await.unwrap();
    assert_eq!(summary.text, "Hail");
    assert_eq!(summary.events, 3);
    assert!(!String::from_utf8(out).unwrap().contains("ignored"));
}

#[tokio::test]
async fn test_message_event_is_skipped() {
    let mut events = EventStream::from_events(vec![
        event(agent_message_json("m-1", "Mild, 18°C")),
        status(Some("Windy"), true),
    ]);
    let mut out: Vec<u8> = Vec::new();

    let summary = consume(&mut events, &mut out).await.unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "Windy\n✅ Done streaming.\n");
    assert_eq!(summary.events, 2);
    assert!(summary.finished);
}

#[tokio::test]
async fn test_stream_ending_without_final_stops_quietly() {
    let mut events = EventStream::from_events(vec![task_event("t-1"), status(Some("Half"), false)]);
    let mut out: Vec<u8> = Vec::new();

    let summary = consume(&mut events, &mut out).await.unwrap();
    let out = String::from_utf8(out).unwrap();
    assert!(out.ends_with("Half"));
    assert!(!out.contains("Done streaming"));
    assert_eq!(summary.events, 2);
    assert!(!summary.finished);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_stream_error_is_returned() {
    let mut events = EventStream::from_events(vec![
        status(Some("Part"), false),
        Err(A2AError::JsonRpc {
            code: -32603,
            message: "Internal error".to_string(),
            data: None,
        }),
        status(None, true),
    ]);
    let mut out: Vec<u8> = Vec::new();

    let err = consume(&mut events, &mut out).await.unwrap_err();
    assert!(matches!(err, A2AError::JsonRpc { code: -32603, .. }));
}

#[tokio::test(start_paused = true)]
async fn test_deadline_applies_to_a_silent_stream() {
    let mut events = futures::stream::pending::<A2AResult<StreamResponse>>();
    let options = WaitOptions::default().with_deadline(Duration::from_secs(30));
    let mut out: Vec<u8> = Vec::new();

    let err = consume_stream(&mut events, &options, &CancellationToken::new(), &mut out)
        .await
        .unwrap_err();
    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_cancelled_stream() {
    let mut events = futures::stream::pending::<A2AResult<StreamResponse>>();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = consume_stream(&mut events, &WaitOptions::default(), &cancel, &mut Vec::<u8>::new())
        .await
        .unwrap_err();
    assert!(matches!(err, A2AError::Cancelled(_)));
}

// ============================================================================
// Through the client
// ============================================================================

#[tokio::test]
async fn test_client_sends_message_stream_request() {
    let transport = ScriptedTransport::new().with_events(vec![
        task_event("t-7"),
        status(Some("Clear skies"), true),
    ]);
    let requests = transport.requests();
    let client = AgentClient::with_transport(Box::new(transport));

    let params = SendMessageBuilder::new("What's the weather in Oslo?").build();
    let mut events = client.send_message_stream(params).await.unwrap();
    let mut out: Vec<u8> = Vec::new();
    let summary = consume(&mut events, &mut out).await.unwrap();

    assert_eq!(summary.task_id.as_deref(), Some("t-7"));
    assert_eq!(summary.text, "Clear skies");

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "message/stream");
    let params = requests[0].params.as_ref().unwrap();
    assert_eq!(params["message"]["role"], "user");
    assert_eq!(params["message"]["parts"][0]["text"], "What's the weather in Oslo?");
    assert!(params["configuration"].get("blocking").is_none());
}
