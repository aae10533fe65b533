//! Task domain types
//!
//! A task is the server-side handle for asynchronous work. Submitting a
//! dataset, training an algorithm or editing a bundle all answer with one.

use serde::{Deserialize, Serialize};

/// Server-side unit of asynchronous work
///
/// Created by a submission response and refreshed by status polls. Once the
/// status is terminal the service never changes it again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    pub status: TaskStatus,
    /// Resource locator produced by a completed task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(
        default,
        rename = "error",
        skip_serializing_if = "Option::is_none"
    )]
    pub error_message: Option<String>,
}

impl Task {
    /// Creates a task handle in the given state with no result
    pub fn new(id: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            id: id.into(),
            uri: None,
            status,
            result: None,
            error_message: None,
        }
    }

    /// Creates a completed task carrying a result locator
    pub fn completed(id: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            result: Some(result.into()),
            ..Self::new(id, TaskStatus::Completed)
        }
    }

    /// Creates a failed task carrying the server message
    pub fn failed(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_message: Some(message.into()),
            ..Self::new(id, TaskStatus::Error)
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Task execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    Queued,
    Running,
    Completed,
    Error,
    Cancelled,
}

impl TaskStatus {
    /// Whether the service will never change this status again
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TaskStatus::Completed | TaskStatus::Error | TaskStatus::Cancelled
        )
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Queued => write!(f, "Queued"),
            TaskStatus::Running => write!(f, "Running"),
            TaskStatus::Completed => write!(f, "Completed"),
            TaskStatus::Error => write!(f, "Error"),
            TaskStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}
