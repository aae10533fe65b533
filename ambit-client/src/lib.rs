//! Ambit HTTP Client
//!
//! A type-safe HTTP client for the Ambit REST service.
//!
//! Every service call is exposed twice: as an inherent method on
//! [`AmbitHttpClient`] and through the [`AmbitApi`] trait, which is the seam the
//! workflow engine depends on so it can run against any transport.
//!
//! # Example
//!
//! ```no_run
//! use ambit_client::AmbitHttpClient;
//! use ambit_core::domain::subject::Subject;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = AmbitHttpClient::new("http://localhost:8080/ambit2");
//!     let subject = Subject::new("guest");
//!
//!     let dataset = client.get_dataset("12", &subject).await?;
//!     println!("Dataset has {} rows", dataset.len());
//!     Ok(())
//! }
//! ```

mod algorithms;
pub mod api;
mod bundles;
mod datasets;
pub mod error;
mod substances;
mod tasks;

// Re-export commonly used types
pub use api::{AmbitApi, TrainParameters};
pub use error::{ClientError, Result};

use ambit_core::domain::subject::Subject;
use ambit_core::domain::task::Task;
use ambit_core::dto::task::TaskEnvelope;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Header carrying the caller subject id on every request
pub const SUBJECT_HEADER: &str = "subjectid";

/// HTTP client for the Ambit service
///
/// Endpoints are organized into logical groups:
/// - Datasets (create from a structure file, fetch, fetch structures)
/// - Algorithms (train)
/// - Tasks (status polling)
/// - Bundles (create, attach substances and properties, listings)
/// - Substances (owner listings, studies)
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct AmbitHttpClient {
    /// Base URL of the service (e.g., "http://localhost:8080/ambit2")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl AmbitHttpClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the service (e.g., "http://localhost:8080/ambit2")
    ///
    /// # Example
    /// ```
    /// use ambit_client::AmbitHttpClient;
    ///
    /// let client = AmbitHttpClient::new("http://localhost:8080/ambit2");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.,
    /// and to share one connection pool with other components.
    ///
    /// # Example
    /// ```
    /// use ambit_client::AmbitHttpClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = AmbitHttpClient::with_client("http://localhost:8080/ambit2", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The underlying HTTP client
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    // =============================================================================
    // Request Helpers
    // =============================================================================

    /// Start a request against a service path on behalf of a subject
    fn request(&self, method: Method, path: &str, subject: &Subject) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!("{} {}", method, url);

        self.client
            .request(method, url)
            .header(SUBJECT_HEADER, subject.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle a response carrying a task envelope and return its task
    async fn handle_task_response(&self, response: reqwest::Response) -> Result<Task> {
        let envelope: TaskEnvelope = self.handle_response(response).await?;

        envelope
            .into_first()
            .ok_or_else(|| ClientError::ParseError("Response contained no task".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = AmbitHttpClient::new("http://localhost:8080/ambit2");
        assert_eq!(client.base_url(), "http://localhost:8080/ambit2");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = AmbitHttpClient::new("http://localhost:8080/ambit2/");
        assert_eq!(client.base_url(), "http://localhost:8080/ambit2");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = AmbitHttpClient::with_client("http://localhost:8080", http_client);
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
