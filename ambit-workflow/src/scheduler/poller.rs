//! Task poller
//!
//! Drives a single server-side task to a terminal state. Status is queried,
//! and while the task is pending the poller sleeps with a growing interval
//! until the task finishes or the timeout runs out. A timed out task is left
//! running on the server.

use std::sync::Arc;

use ambit_client::AmbitApi;
use ambit_core::domain::subject::Subject;
use ambit_core::domain::task::{Task, TaskStatus};
use tokio::time::{self, Duration, Instant};
use tracing::{debug, instrument, warn};

use crate::error::PollError;

/// How a task is polled
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollPolicy {
    /// Budget for a single task
    pub timeout: Duration,
    /// Delay after the first pending snapshot
    pub initial_interval: Duration,
    /// Cap on the delay between queries
    pub max_interval: Duration,
    /// Growth factor applied to the delay after every query
    pub backoff_factor: f64,
}

/// Smallest delay between two status queries
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

impl PollPolicy {
    /// Delay to use after `current`, never above `max_interval`
    pub fn next_interval(&self, current: Duration) -> Duration {
        Duration::try_from_secs_f64(current.as_secs_f64() * self.backoff_factor)
            .map_or(self.max_interval, |next| next.min(self.max_interval))
    }

    /// Policy with intervals and growth factor brought into a usable range
    ///
    /// Intervals are at least [`MIN_POLL_INTERVAL`], the cap is never below
    /// the initial interval and a factor that is not a finite number >= 1.0
    /// becomes 1.0.
    pub fn normalized(self) -> Self {
        let initial_interval = self.initial_interval.max(MIN_POLL_INTERVAL);
        let backoff_factor = if self.backoff_factor.is_finite() && self.backoff_factor >= 1.0 {
            self.backoff_factor
        } else {
            1.0
        };

        Self {
            timeout: self.timeout,
            initial_interval,
            max_interval: self.max_interval.max(initial_interval),
            backoff_factor,
        }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(5000),
            initial_interval: Duration::from_millis(250),
            max_interval: Duration::from_millis(2000),
            backoff_factor: 2.0,
        }
    }
}

/// A task that completed, with its result locator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTask {
    pub task_id: String,
    pub result: String,
}

/// Polls task status until a terminal state or the timeout
#[derive(Clone)]
pub struct TaskPoller {
    api: Arc<dyn AmbitApi>,
    policy: PollPolicy,
}

impl TaskPoller {
    /// Creates a new task poller
    ///
    /// The policy is [normalized](PollPolicy::normalized) first.
    pub fn new(api: Arc<dyn AmbitApi>, policy: PollPolicy) -> Self {
        let normalized = policy.normalized();
        if normalized != policy {
            warn!(?policy, "Poll policy adjusted to a usable range");
        }

        Self {
            api,
            policy: normalized,
        }
    }

    pub fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    /// Waits for a task to finish
    ///
    /// Only the calling future is suspended between queries. Once a terminal
    /// snapshot is seen no further queries are issued.
    ///
    /// # Errors
    /// * `RemoteTaskFailed` - the task ended in Error or Cancelled
    /// * `PollTimeout` - the task was still pending after `timeout`
    /// * `MissingResult` - the task completed without a result locator
    /// * `Status` - a status query failed
    #[instrument(name = "await_task", skip_all, fields(task_id = %task_id))]
    pub async fn await_task(
        &self,
        task_id: &str,
        subject: &Subject,
        timeout: Duration,
    ) -> Result<ResolvedTask, PollError> {
        let started = Instant::now();
        let mut interval = self.policy.initial_interval;
        let mut queries: u32 = 0;

        loop {
            let snapshot = self
                .api
                .poll_task(task_id, subject)
                .await
                .map_err(|source| PollError::Status {
                    task_id: task_id.to_string(),
                    source,
                })?;
            queries += 1;

            if let Some(outcome) = resolve_terminal(snapshot) {
                debug!(queries, "Task reached a terminal state");
                return outcome;
            }

            let elapsed = started.elapsed();
            if elapsed >= timeout {
                let elapsed_millis = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
                warn!(queries, elapsed_millis, "Task did not finish in time");
                return Err(PollError::PollTimeout {
                    task_id: task_id.to_string(),
                    elapsed_millis,
                });
            }

            time::sleep(interval.min(timeout - elapsed)).await;
            interval = self.policy.next_interval(interval);
        }
    }

    /// Resolves a task handle returned by a submission
    ///
    /// Handles that are already terminal are evaluated without querying the
    /// service; pending ones are polled with the policy timeout.
    pub async fn settle(&self, task: Task, subject: &Subject) -> Result<ResolvedTask, PollError> {
        let task_id = task.id.clone();

        match resolve_terminal(task) {
            Some(outcome) => outcome,
            None => self.await_task(&task_id, subject, self.policy.timeout).await,
        }
    }
}

/// Outcome of a terminal snapshot, `None` while the task is pending
fn resolve_terminal(task: Task) -> Option<Result<ResolvedTask, PollError>> {
    match task.status {
        TaskStatus::Queued | TaskStatus::Running => None,
        TaskStatus::Completed => Some(match task.result {
            Some(result) => Ok(ResolvedTask {
                task_id: task.id,
                result,
            }),
            None => Err(PollError::MissingResult { task_id: task.id }),
        }),
        TaskStatus::Error | TaskStatus::Cancelled => {
            let error_message = task
                .error_message
                .unwrap_or_else(|| format!("task ended with status {}", task.status));
            Some(Err(PollError::RemoteTaskFailed {
                task_id: task.id,
                error_message,
            }))
        }
    }
}
