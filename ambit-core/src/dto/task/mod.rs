//! Task DTOs

use serde::{Deserialize, Serialize};

use crate::domain::task::Task;

/// Task response body
///
/// The service wraps task handles in a list even when a single task is
/// returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskEnvelope {
    #[serde(default)]
    pub task: Vec<Task>,
}

impl TaskEnvelope {
    /// The first task in the envelope, if the service returned any
    pub fn into_first(self) -> Option<Task> {
        self.task.into_iter().next()
    }
}
