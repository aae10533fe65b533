//! Core domain types
//!
//! These types represent the resources exposed by the remote service and the
//! inputs callers hand to the workflows.

pub mod bundle;
pub mod dataset;
pub mod protocol;
pub mod study;
pub mod subject;
pub mod task;
