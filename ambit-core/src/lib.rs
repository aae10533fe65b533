//! Ambit Core
//!
//! Core types shared by the Ambit client, the workflow engine and the CLI.
//!
//! This crate contains:
//! - Domain types: tasks, datasets, bundles, studies and the protocol category taxonomy
//! - DTOs: wire representations of requests and task envelopes

pub mod domain;
pub mod dto;
