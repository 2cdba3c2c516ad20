//! Branching on the result of `message/send`.

use std::io::Write;

use tokio_util::sync::CancellationToken;

use crate::client::AgentClient;
use crate::error::A2AResult;
use crate::types::{SendMessageResponse, Task};
use crate::utils::{final_reply, message_text};

use super::poll::wait_for_task_result;
use super::WaitOptions;

/// The agent's final answer to a `message/send`.
#[derive(Debug, Clone)]
pub enum Reply {
    /// The agent answered synchronously; nothing was polled.
    Direct {
        /// Concatenated text parts of the reply message.
        text: String,
    },
    /// The agent created a task, which was polled until it stopped working.
    Polled {
        /// Concatenated text parts of the task's final history entry.
        text: String,
        /// The task as last fetched.
        task: Task,
    },
}

impl Reply {
    /// The reply text.
    pub fn text(&self) -> &str {
        match self {
            Reply::Direct { text } | Reply::Polled { text, .. } => text,
        }
    }
}

/// Resolve a `message/send` result into the agent's final reply.
///
/// A message is the answer itself. A task is always polled (at least one
/// `tasks/get`, even if it already looks finished) and its last history
/// entry is the answer. `🛠  Task created, polling for result…` is written
/// to `out` before polling starts.
pub async fn resolve_reply<W>(
    client: &AgentClient,
    response: SendMessageResponse,
    options: &WaitOptions,
    cancel: &CancellationToken,
    out: &mut W,
) -> A2AResult<Reply>
where
    W: Write + ?Sized,
{
    match response {
        SendMessageResponse::Message(message) => Ok(Reply::Direct {
            text: message_text(&message),
        }),
        SendMessageResponse::Task(handle) => {
            writeln!(out, "🛠  Task created, polling for result…")?;
            out.flush()?;
            let task = wait_for_task_result(client, &handle.id, options, cancel).await?;
            tracing::debug!(task_id = %task.id, state = %task.status.state, "task finished");
            let text = message_text(final_reply(&task)?);
            Ok(Reply::Polled { text, task })
        }
    }
}
