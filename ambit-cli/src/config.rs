//! Configuration module
//!
//! Combines command line flags with the environment-driven client settings.

use std::time::Duration;

use ambit_core::domain::subject::Subject;
use ambit_workflow::ClientConfig;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Settings handed to the client
    pub client: ClientConfig,
    /// Subject every command runs as
    pub subject: Subject,
}

impl Config {
    /// Builds the configuration
    ///
    /// Polling and descriptor settings come from the environment; the
    /// flags win for URL and timeout.
    pub fn load(base_url: String, subject: String, poll_timeout_ms: Option<u64>) -> Self {
        let mut client = ClientConfig::new(base_url).with_env_overrides();

        if let Some(ms) = poll_timeout_ms {
            client = client.with_poll_timeout(Duration::from_millis(ms));
        }

        Self {
            client,
            subject: Subject::new(subject),
        }
    }
}
