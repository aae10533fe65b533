//! Ambit workflow engine
//!
//! Drives server-side tasks of an Ambit service to completion and composes
//! them into client-visible workflows:
//! - [`scheduler::TaskPoller`] polls a task until it reaches a terminal state
//! - [`scheduler::Orchestrator`] chains steps in sequence or fans them out as a group
//! - [`workflow`] holds descriptor generation and bundle creation
//! - [`AmbitClient`] ties everything to one shared transport
//!
//! # Example
//!
//! ```no_run
//! use ambit_core::domain::bundle::BundleSpecification;
//! use ambit_core::domain::subject::Subject;
//! use ambit_workflow::{AmbitClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = AmbitClient::connect(ClientConfig::from_env()?)?;
//!     let subject = Subject::new("guest");
//!
//!     let spec = BundleSpecification::new("OWNER-1", "screening set");
//!     let uri = client.create_bundle(spec, "guest", &subject).await?;
//!     println!("created {}", uri);
//!
//!     client.close().await;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod input;
pub mod locator;
pub mod scheduler;
pub mod workflow;

#[cfg(test)]
mod testing;

pub use client::AmbitClient;
pub use config::ClientConfig;
pub use error::{PollError, Result, StepFailure, WorkflowError};
