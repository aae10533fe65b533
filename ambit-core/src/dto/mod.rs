//! Data Transfer Objects
//!
//! Request payloads and response envelopes exchanged with the remote service.
//! They stay close to the wire and are converted into domain types by the client.

pub mod bundle;
pub mod task;
