//! Error types for task polling and workflows

use ambit_client::ClientError;
use thiserror::Error;

/// Result type alias for workflow operations
pub type Result<T> = std::result::Result<T, WorkflowError>;

/// Errors raised while waiting for a single task
#[derive(Debug, Error)]
pub enum PollError {
    /// Task reached Error or Cancelled
    #[error("Task {task_id} failed: {error_message}")]
    RemoteTaskFailed {
        task_id: String,
        /// Message reported by the service, verbatim
        error_message: String,
    },

    /// Task was still pending when the timeout elapsed
    #[error("Task {task_id} did not finish within {elapsed_millis} ms")]
    PollTimeout { task_id: String, elapsed_millis: u64 },

    /// Task completed without a result locator
    #[error("Task {task_id} completed without a result")]
    MissingResult { task_id: String },

    /// Status query itself failed
    #[error("Failed to query status of task {task_id}: {source}")]
    Status {
        task_id: String,
        #[source]
        source: ClientError,
    },
}

/// Errors surfaced by the orchestrator, the workflows and the client facade
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Input reference is neither a valid inline payload nor a fetchable URL
    #[error("Invalid input reference: {0}")]
    InvalidInputReference(String),

    /// Input URL could not be downloaded
    #[error("Failed to fetch input from {url}: {message}")]
    InputFetchFailed { url: String, message: String },

    /// Bundle specification rejected before any remote call
    #[error("Invalid bundle specification: {0}")]
    InvalidBundleSpecification(String),

    #[error("Task {task_id} failed: {error_message}")]
    RemoteTaskFailed {
        task_id: String,
        error_message: String,
    },

    #[error("Task {task_id} did not finish within {elapsed_millis} ms")]
    PollTimeout { task_id: String, elapsed_millis: u64 },

    #[error("Task {task_id} completed without a result")]
    MissingResult { task_id: String },

    /// Status query of a task failed
    #[error("Failed to query status of task {task_id}: {source}")]
    StatusQuery {
        task_id: String,
        #[source]
        source: ClientError,
    },

    /// Task result does not point at the expected kind of resource
    #[error("Malformed result locator '{locator}': expected a {resource} URI")]
    MalformedLocator {
        locator: String,
        resource: &'static str,
    },

    /// A sequence step that needs the previous value was run first
    #[error("Step {step} requires the result of a previous step")]
    MissingInput { step: String },

    /// One or more members of a fan-out group failed
    #[error(
        "{failed} of {total} group steps failed: {summary}",
        failed = .failures.len(),
        summary = summarize(.failures)
    )]
    AggregateGroupFailure {
        total: usize,
        failures: Vec<StepFailure>,
    },

    /// Two members of a group share a name
    #[error("Group step {step} appears more than once")]
    DuplicateStep { step: String },

    /// Bundle was created but filling it failed; the bundle stays on the service
    #[error("Bundle {bundle_uri} was created but could not be filled: {source}")]
    BundleAttachFailed {
        bundle_uri: String,
        bundle_id: String,
        /// Substances resolved for the bundle, empty if resolution itself failed
        substances: Vec<String>,
        #[source]
        source: Box<WorkflowError>,
    },

    /// The client was closed; no further operations may be issued
    #[error("Client is closed")]
    ClientClosed,

    /// Remote call failed at the transport or API level
    #[error(transparent)]
    Remote(#[from] ClientError),
}

impl WorkflowError {
    /// Names of the failed members when this is a group failure
    pub fn failed_steps(&self) -> Vec<&str> {
        match self {
            WorkflowError::AggregateGroupFailure { failures, .. } => {
                failures.iter().map(|f| f.step.as_str()).collect()
            }
            WorkflowError::BundleAttachFailed { source, .. } => source.failed_steps(),
            _ => Vec::new(),
        }
    }
}

impl From<PollError> for WorkflowError {
    fn from(err: PollError) -> Self {
        match err {
            PollError::RemoteTaskFailed {
                task_id,
                error_message,
            } => WorkflowError::RemoteTaskFailed {
                task_id,
                error_message,
            },
            PollError::PollTimeout {
                task_id,
                elapsed_millis,
            } => WorkflowError::PollTimeout {
                task_id,
                elapsed_millis,
            },
            PollError::MissingResult { task_id } => WorkflowError::MissingResult { task_id },
            PollError::Status { task_id, source } => {
                WorkflowError::StatusQuery { task_id, source }
            }
        }
    }
}

/// A failed member of a fan-out group
#[derive(Debug)]
pub struct StepFailure {
    pub step: String,
    pub error: WorkflowError,
}

impl std::fmt::Display for StepFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.step, self.error)
    }
}

fn summarize(failures: &[StepFailure]) -> String {
    failures
        .iter()
        .map(StepFailure::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
