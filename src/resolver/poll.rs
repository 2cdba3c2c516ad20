//! Blocking mode: poll a task until it leaves `working`.

use tokio_util::sync::CancellationToken;

use crate::client::{AgentClient, POLL_HISTORY_LENGTH};
use crate::error::A2AResult;
use crate::types::Task;

use super::{WaitContext, WaitOptions};

/// Poll `tasks/get` for `task_id` until the task is no longer `working`.
///
/// The first fetch happens immediately; each `working` answer is followed by
/// a sleep of `options.poll_interval`. Any other state is terminal and the
/// task is returned as fetched. There is no retry: the first fetch error is
/// returned as is.
///
/// # Errors
///
/// Besides fetch errors, returns [`A2AError::Timeout`](crate::A2AError::Timeout)
/// when `options.deadline` passes and
/// [`A2AError::Cancelled`](crate::A2AError::Cancelled) when `cancel` fires.
pub async fn wait_for_task_result(
    client: &AgentClient,
    task_id: &str,
    options: &WaitOptions,
    cancel: &CancellationToken,
) -> A2AResult<Task> {
    let wait = WaitContext::start(options, cancel);
    let mut attempt: u64 = 0;

    loop {
        attempt += 1;
        let task = wait
            .run(
                "fetching task status",
                client.get_task_by_id(task_id, Some(POLL_HISTORY_LENGTH)),
            )
            .await?;

        tracing::debug!(task_id, attempt, state = %task.status.state, "polled task");

        if !task.status.state.is_working() {
            return Ok(task);
        }

        wait.sleep(options.poll_interval).await?;
    }
}
