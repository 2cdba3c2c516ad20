//! Utility functions for reading the outcome of an A2A Task.

use crate::error::{A2AError, A2AResult};
use crate::types::{Message, Task};

/// Returns the agent's final answer for a task that has left `working`.
///
/// The answer is the last entry of the task history. Agents that do not
/// echo history put the answer on `status.message` instead, which is used
/// as a fallback.
///
/// # Errors
///
/// Returns [`A2AError::InvalidAgentResponse`] if the task carries neither.
pub fn final_reply(task: &Task) -> A2AResult<&Message> {
    task.history
        .as_deref()
        .and_then(<[Message]>::last)
        .or(task.status.message.as_ref())
        .ok_or_else(|| {
            A2AError::InvalidAgentResponse(format!(
                "task {} finished in state '{}' with no history and no status message",
                task.id, task.status.state
            ))
        })
}
