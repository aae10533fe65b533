//! Scheduling layer
//!
//! This layer waits for server-side tasks and composes remote operations
//! into ordered sequences and concurrent groups.

pub mod orchestrator;
pub mod poller;

pub use orchestrator::{GroupStep, Orchestrator, SequenceStep, StepOutcome};
pub use poller::{PollPolicy, ResolvedTask, TaskPoller};
