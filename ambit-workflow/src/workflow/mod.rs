//! Workflows
//!
//! Each workflow is a fixed composition of orchestrator steps implementing
//! one client-visible use case. Workflows hold their collaborators and run
//! on behalf of the subject carried by the [`Orchestrator`](crate::scheduler::Orchestrator)
//! they are given.

mod bundle;
mod descriptor;

pub use bundle::BundleCreationWorkflow;
pub use descriptor::{DescriptorWorkflow, training_parameters};
