//! Streaming mode: print status-update text until the final event.

use std::io::Write;

use futures::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;

use crate::error::A2AResult;
use crate::types::StreamResponse;
use crate::utils::message_text;

use super::{WaitContext, WaitOptions};

/// What a consumed stream produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamSummary {
    /// Id of the task the agent reported, if any.
    pub task_id: Option<String>,
    /// All text written, in arrival order.
    pub text: String,
    /// Number of events read, the final one included.
    pub events: usize,
    /// Whether a final status update ended the stream.
    pub finished: bool,
}

/// Consume `events` in arrival order, writing agent text to `out` as it comes.
///
/// - `task` → writes `🛠  Task created: {id}`.
/// - `status-update` → writes the text parts of its message, if any, with no
///   newline; when `final` is set, writes `\n✅ Done streaming.` and stops.
/// - `message`, `artifact-update` → ignored.
///
/// A stream that closes before a final event ends the session quietly: no
/// done notice, and `finished` is left unset. Nothing is read after a final
/// event, so the caller can still inspect (or drop) the rest of the stream.
///
/// # Errors
///
/// The first stream error is returned as is. Deadline and cancellation
/// apply to each wait for the next event.
pub async fn consume_stream<S, W>(
    events: &mut S,
    options: &WaitOptions,
    cancel: &CancellationToken,
    out: &mut W,
) -> A2AResult<StreamSummary>
where
    S: Stream<Item = A2AResult<StreamResponse>> + Unpin,
    W: Write + ?Sized,
{
    let wait = WaitContext::start(options, cancel);
    let mut summary = StreamSummary::default();

    loop {
        let event = wait
            .run("waiting for the next stream event", async { Ok(events.next().await) })
            .await?;
        let Some(event) = event else {
            tracing::debug!(events = summary.events, "stream closed without a final event");
            return Ok(summary);
        };
        let event = event?;
        summary.events += 1;

        match event {
            StreamResponse::Task(task) => {
                writeln!(out, "🛠  Task created: {}", task.id)?;
                summary.task_id = Some(task.id);
            }
            StreamResponse::StatusUpdate(update) => {
                tracing::debug!(
                    task_id = %update.task_id,
                    state = %update.status.state,
                    is_final = update.r#final,
                    "status update"
                );
                if let Some(message) = &update.status.message {
                    emit(out, &mut summary, &message_text(message))?;
                }
                if update.r#final {
                    writeln!(out, "\n✅ Done streaming.")?;
                    summary.finished = true;
                    return Ok(summary);
                }
            }
            StreamResponse::Message(message) => {
                tracing::debug!(message_id = %message.message_id, "skipping message event");
            }
            StreamResponse::ArtifactUpdate(update) => {
                tracing::warn!(task_id = %update.task_id, "skipping artifact update");
            }
        }
    }
}

fn emit<W: Write + ?Sized>(out: &mut W, summary: &mut StreamSummary, text: &str) -> A2AResult<()> {
    out.write_all(text.as_bytes())?;
    out.flush()?;
    summary.text.push_str(text);
    Ok(())
}
