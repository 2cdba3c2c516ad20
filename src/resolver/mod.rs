//! Turning an agent's response into its final reply.
//!
//! - [`dispatch`]: branch on a `message/send` result: print a direct reply,
//!   or poll the task it created
//! - [`poll`]: fixed-interval `tasks/get` polling until the task leaves
//!   `working`
//! - [`stream`]: consume `message/stream` events until one is final
//!
//! Every wait runs under [`WaitOptions`] and a [`CancellationToken`]. With the
//! default options the wait is unbounded, matching the agent protocol's
//! own lack of a completion deadline.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{A2AError, A2AResult};

pub mod dispatch;
pub mod poll;
pub mod stream;

pub use dispatch::{resolve_reply, Reply};
pub use poll::wait_for_task_result;
pub use stream::{consume_stream, StreamSummary};

/// Interval between `tasks/get` calls unless configured otherwise.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10_000);

/// How long, and how often, to wait for a final answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitOptions {
    /// Sleep between two status fetches.
    pub poll_interval: Duration,
    /// Overall budget for the wait. `None` waits forever.
    pub deadline: Option<Duration>,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            deadline: None,
        }
    }
}

impl WaitOptions {
    /// Set the poll interval (builder-style).
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Bound the whole wait (builder-style).
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// A running wait: the absolute deadline plus the cancellation token.
///
/// Each suspension point goes through [`WaitContext::run`], so an expired
/// deadline or a cancelled token interrupts a sleep or an in-flight call.
#[derive(Debug, Clone)]
pub(crate) struct WaitContext {
    deadline: Option<Instant>,
    cancel: CancellationToken,
}

impl WaitContext {
    /// Start the clock now.
    pub(crate) fn start(options: &WaitOptions, cancel: &CancellationToken) -> Self {
        Self {
            deadline: options.deadline.map(|d| Instant::now() + d),
            cancel: cancel.clone(),
        }
    }

    /// Drive `fut` unless the wait is cancelled or out of time first.
    ///
    /// `what` names the suspended step in the resulting error.
    pub(crate) async fn run<T, F>(&self, what: &str, fut: F) -> A2AResult<T>
    where
        F: Future<Output = A2AResult<T>>,
    {
        let expired = async {
            match self.deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(A2AError::Cancelled(format!("cancelled while {what}"))),
            _ = expired => Err(A2AError::Timeout(format!("wait deadline expired while {what}"))),
            result = fut => result,
        }
    }

    /// Sleep for `duration`, interruptibly.
    pub(crate) async fn sleep(&self, duration: Duration) -> A2AResult<()> {
        self.run("waiting to poll again", async {
            tokio::time::sleep(duration).await;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_unbounded_ten_seconds() {
        let options = WaitOptions::default();
        assert_eq!(options.poll_interval, Duration::from_secs(10));
        assert!(options.deadline.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_interrupts_sleep() {
        let options = WaitOptions::default().with_deadline(Duration::from_secs(1));
        let wait = WaitContext::start(&options, &CancellationToken::new());
        let err = wait.sleep(Duration::from_secs(60)).await.unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_interrupts_sleep() {
        let cancel = CancellationToken::new();
        let wait = WaitContext::start(&WaitOptions::default(), &cancel);
        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            canceller.cancel();
        });
        let err = wait.sleep(Duration::from_secs(60)).await.unwrap_err();
        assert!(matches!(err, A2AError::Cancelled(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn unbounded_wait_completes() {
        let wait = WaitContext::start(&WaitOptions::default(), &CancellationToken::new());
        let value = wait.run("computing", async { Ok(42) }).await.unwrap();
        assert_eq!(value, 42);
    }
}
