//! Client configuration
//!
//! Defines the service location, task polling budget and the descriptor
//! computation settings.

use std::time::Duration;

use crate::scheduler::PollPolicy;

/// Algorithm used to compute structure descriptors
pub const DEFAULT_DESCRIPTOR_ALGORITHM: &str = "ambit2.mopac.MopacOriginalStructure";

/// Command line handed to the descriptor algorithm
pub const DEFAULT_DESCRIPTOR_COMMANDS: &str = "PM3 NOINTER MMOK BONDS MULLIK GNORM=1.0 T=30.00M";

/// Client configuration
///
/// Poll intervals and timeouts are configurable so the same client can talk
/// to a local test service or a slow production deployment.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URL (e.g., "http://localhost:8080/ambit2")
    pub base_url: String,

    /// Maximum time to wait for a single task to reach a terminal state
    pub poll_timeout: Duration,

    /// Delay before the second status query of a task
    pub poll_interval: Duration,

    /// Upper bound for the delay between status queries
    pub max_poll_interval: Duration,

    /// Factor applied to the delay after every status query
    pub backoff_factor: f64,

    /// Timeout applied to every HTTP request
    pub request_timeout: Duration,

    /// Algorithm used by descriptor generation
    pub descriptor_algorithm: String,

    /// Commands passed to the descriptor algorithm
    pub descriptor_commands: String,
}

impl ClientConfig {
    /// Creates a new configuration with defaults
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            poll_timeout: Duration::from_millis(5000),
            poll_interval: Duration::from_millis(250),
            max_poll_interval: Duration::from_millis(2000),
            backoff_factor: 2.0,
            request_timeout: Duration::from_secs(30),
            descriptor_algorithm: DEFAULT_DESCRIPTOR_ALGORITHM.to_string(),
            descriptor_commands: DEFAULT_DESCRIPTOR_COMMANDS.to_string(),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - AMBIT_BASE_URL (required)
    /// - every optional variable read by [`with_env_overrides`](Self::with_env_overrides)
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url = std::env::var("AMBIT_BASE_URL")
            .map_err(|_| anyhow::anyhow!("AMBIT_BASE_URL environment variable not set"))?;

        Ok(Self::new(base_url).with_env_overrides())
    }

    /// Applies the optional settings found in the environment
    ///
    /// - AMBIT_POLL_TIMEOUT_MS (default: 5000)
    /// - AMBIT_POLL_INTERVAL_MS (default: 250)
    /// - AMBIT_MAX_POLL_INTERVAL_MS (default: 2000)
    /// - AMBIT_BACKOFF_FACTOR (default: 2.0)
    /// - AMBIT_REQUEST_TIMEOUT_SECS (default: 30)
    /// - AMBIT_DESCRIPTOR_ALGORITHM
    /// - AMBIT_DESCRIPTOR_COMMANDS
    ///
    /// The base URL is left untouched.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parse_u64 = |key: &str| lookup(key).and_then(|s| s.parse::<u64>().ok());

        if let Some(ms) = parse_u64("AMBIT_POLL_TIMEOUT_MS") {
            self.poll_timeout = Duration::from_millis(ms);
        }

        if let Some(ms) = parse_u64("AMBIT_POLL_INTERVAL_MS") {
            self.poll_interval = Duration::from_millis(ms);
        }

        if let Some(ms) = parse_u64("AMBIT_MAX_POLL_INTERVAL_MS") {
            self.max_poll_interval = Duration::from_millis(ms);
        }

        if let Some(factor) = lookup("AMBIT_BACKOFF_FACTOR").and_then(|s| s.parse::<f64>().ok()) {
            self.backoff_factor = factor;
        }

        if let Some(secs) = parse_u64("AMBIT_REQUEST_TIMEOUT_SECS") {
            self.request_timeout = Duration::from_secs(secs);
        }

        if let Some(algorithm) = lookup("AMBIT_DESCRIPTOR_ALGORITHM") {
            self.descriptor_algorithm = algorithm;
        }

        if let Some(commands) = lookup("AMBIT_DESCRIPTOR_COMMANDS") {
            self.descriptor_commands = commands;
        }

        self
    }

    /// Overrides the per-task poll timeout
    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    /// Polling behavior derived from this configuration
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            timeout: self.poll_timeout,
            initial_interval: self.poll_interval,
            max_interval: self.max_poll_interval,
            backoff_factor: self.backoff_factor,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.base_url.is_empty() {
            anyhow::bail!("base_url cannot be empty");
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!("base_url must start with http:// or https://");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.max_poll_interval < self.poll_interval {
            anyhow::bail!("max_poll_interval must not be smaller than poll_interval");
        }

        if !self.backoff_factor.is_finite() || self.backoff_factor < 1.0 {
            anyhow::bail!("backoff_factor must be a finite number >= 1.0");
        }

        if self.descriptor_algorithm.is_empty() {
            anyhow::bail!("descriptor_algorithm cannot be empty");
        }

        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080/ambit2")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.poll_timeout, Duration::from_millis(5000));
        assert_eq!(config.descriptor_commands, DEFAULT_DESCRIPTOR_COMMANDS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ClientConfig::default();

        config.base_url = "not-a-url".to_string();
        assert!(config.validate().is_err());

        config.base_url = "https://ambit.example.org/ambit2".to_string();
        assert!(config.validate().is_ok());

        config.backoff_factor = 0.5;
        assert!(config.validate().is_err());

        config.backoff_factor = 1.5;
        config.max_poll_interval = Duration::from_millis(10);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides_apply_without_base_url() {
        let vars = std::collections::HashMap::from([
            ("AMBIT_POLL_INTERVAL_MS", "100"),
            ("AMBIT_BACKOFF_FACTOR", "1.5"),
            ("AMBIT_DESCRIPTOR_COMMANDS", "AM1"),
            ("AMBIT_REQUEST_TIMEOUT_SECS", "not-a-number"),
        ]);

        let config = ClientConfig::new("http://cli.example.org/ambit2")
            .with_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.base_url, "http://cli.example.org/ambit2");
        assert_eq!(config.poll_interval, Duration::from_millis(100));
        assert_eq!(config.backoff_factor, 1.5);
        assert_eq!(config.descriptor_commands, "AM1");
        // Unparseable values keep the default
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.poll_timeout, Duration::from_millis(5000));
    }

    #[test]
    fn test_poll_policy_follows_config() {
        let config = ClientConfig::default().with_poll_timeout(Duration::from_millis(900));
        let policy = config.poll_policy();

        assert_eq!(policy.timeout, Duration::from_millis(900));
        assert_eq!(policy.initial_interval, config.poll_interval);
        assert_eq!(policy.max_interval, config.max_poll_interval);
    }
}
