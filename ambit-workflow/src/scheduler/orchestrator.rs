//! Workflow orchestrator
//!
//! Two composition primitives over remote operations:
//! - [`Orchestrator::sequence`] runs steps strictly in order, feeding each
//!   step the resolved value of the one before it.
//! - [`Orchestrator::group`] drives independent steps concurrently and joins
//!   all of them, collecting every failure instead of stopping at the first.
//!
//! A step yields either a value or a task handle; handles are settled through
//! the [`TaskPoller`] before their result is used.

use std::collections::{BTreeMap, HashSet};
use std::future::Future;

use ambit_client::ClientError;
use ambit_core::domain::subject::Subject;
use ambit_core::domain::task::Task;
use futures::future::{BoxFuture, join_all};
use tracing::{debug, info, instrument, warn};

use crate::error::{Result, StepFailure, WorkflowError};
use crate::scheduler::poller::TaskPoller;

/// What a step produced
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Value available immediately
    Ready(String),
    /// Server-side task whose result is the value
    Task(Task),
}

impl StepOutcome {
    /// Outcome of a submission call that answers with a task handle
    pub fn submitted(response: std::result::Result<Task, ClientError>) -> Result<Self> {
        Ok(StepOutcome::Task(response?))
    }
}

impl From<Task> for StepOutcome {
    fn from(task: Task) -> Self {
        StepOutcome::Task(task)
    }
}

pub type StepFuture<'a> = BoxFuture<'a, Result<StepOutcome>>;

type StepFn<'a> = Box<dyn FnOnce(Option<String>) -> StepFuture<'a> + Send + 'a>;

/// A step of a [`sequence`](Orchestrator::sequence)
///
/// The step receives the previous step's value, or `None` when it runs first.
pub struct SequenceStep<'a> {
    name: String,
    run: StepFn<'a>,
}

impl<'a> SequenceStep<'a> {
    pub fn new<F, Fut>(name: impl Into<String>, step: F) -> Self
    where
        F: FnOnce(Option<String>) -> Fut + Send + 'a,
        Fut: Future<Output = Result<StepOutcome>> + Send + 'a,
    {
        Self {
            name: name.into(),
            run: Box::new(move |input| -> StepFuture<'a> { Box::pin(step(input)) }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A member of a [`group`](Orchestrator::group)
pub struct GroupStep<'a> {
    name: String,
    future: StepFuture<'a>,
}

impl<'a> GroupStep<'a> {
    pub fn new<Fut>(name: impl Into<String>, step: Fut) -> Self
    where
        Fut: Future<Output = Result<StepOutcome>> + Send + 'a,
    {
        Self {
            name: name.into(),
            future: Box::pin(step),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Runs steps on behalf of one subject
pub struct Orchestrator {
    poller: TaskPoller,
    subject: Subject,
    execution_id: String,
}

impl Orchestrator {
    /// Creates an orchestrator for a single workflow execution
    pub fn new(poller: TaskPoller, subject: Subject) -> Self {
        Self {
            poller,
            subject,
            execution_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Identifier of this execution, recorded in every span
    pub fn execution_id(&self) -> &str {
        &self.execution_id
    }

    /// Turns a step outcome into its value, polling when it is a task
    async fn resolve(&self, step: &str, outcome: StepOutcome) -> Result<String> {
        match outcome {
            StepOutcome::Ready(value) => Ok(value),
            StepOutcome::Task(task) => {
                debug!(step, task_id = %task.id, "Settling task");
                let resolved = self.poller.settle(task, &self.subject).await?;
                Ok(resolved.result)
            }
        }
    }

    /// Runs one remote operation and settles its outcome
    pub async fn run_step<Fut>(&self, name: &str, step: Fut) -> Result<String>
    where
        Fut: Future<Output = Result<StepOutcome>>,
    {
        let outcome = step.await?;
        self.resolve(name, outcome).await
    }

    /// Runs steps strictly in order
    ///
    /// Step N is not started before step N-1 has resolved. The first failure
    /// aborts the remaining steps and is returned unchanged.
    ///
    /// # Returns
    /// The last step's value, or `None` for an empty sequence
    #[instrument(
        name = "sequence",
        skip_all,
        fields(execution_id = %self.execution_id, steps = steps.len())
    )]
    pub async fn sequence(&self, steps: Vec<SequenceStep<'_>>) -> Result<Option<String>> {
        let mut previous = None;

        for (index, step) in steps.into_iter().enumerate() {
            let SequenceStep { name, run } = step;
            debug!(step = %name, index, "Sequence step started");

            let value = match run(previous.take()).await {
                Ok(outcome) => self.resolve(&name, outcome).await,
                Err(e) => Err(e),
            };

            match value {
                Ok(value) => previous = Some(value),
                Err(e) => {
                    warn!(step = %name, index, error = %e, "Sequence aborted");
                    return Err(e);
                }
            }
        }

        Ok(previous)
    }

    /// Runs every step concurrently and waits for all of them
    ///
    /// Failures do not cancel the other members. When any member fails the
    /// result is an `AggregateGroupFailure` listing every failed member.
    /// Member names must be unique; a repeated name fails with
    /// `DuplicateStep` before any member runs.
    ///
    /// # Returns
    /// Resolved values keyed by step name
    #[instrument(
        name = "group",
        skip_all,
        fields(execution_id = %self.execution_id, steps = steps.len())
    )]
    pub async fn group(&self, steps: Vec<GroupStep<'_>>) -> Result<BTreeMap<String, String>> {
        let total = steps.len();

        if let Some(step) = first_repeated_name(&steps) {
            return Err(WorkflowError::DuplicateStep { step });
        }

        let outcomes = join_all(steps.into_iter().map(|step| async move {
            let GroupStep { name, future } = step;
            let value = match future.await {
                Ok(outcome) => self.resolve(&name, outcome).await,
                Err(e) => Err(e),
            };
            (name, value)
        }))
        .await;

        let mut resolved = BTreeMap::new();
        let mut failures = Vec::new();

        for (name, value) in outcomes {
            match value {
                Ok(value) => {
                    resolved.insert(name, value);
                }
                Err(error) => {
                    warn!(step = %name, error = %error, "Group step failed");
                    failures.push(StepFailure { step: name, error });
                }
            }
        }

        if failures.is_empty() {
            info!(total, "Group completed");
            Ok(resolved)
        } else {
            Err(WorkflowError::AggregateGroupFailure { total, failures })
        }
    }
}

fn first_repeated_name(steps: &[GroupStep<'_>]) -> Option<String> {
    let mut names = HashSet::with_capacity(steps.len());
    steps
        .iter()
        .find(|step| !names.insert(step.name.as_str()))
        .map(|step| step.name.clone())
}
