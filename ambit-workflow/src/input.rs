//! Structure file input
//!
//! A structure file is handed over either inline, as a `data:` reference
//! carrying a base64 payload, or as an http(s) URL that is downloaded in full.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::{Result, WorkflowError};

/// Marker prefix of inline references
pub const INLINE_MARKER: &str = "data:";

/// Parsed input reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputReference {
    /// Decoded inline payload
    Inline(Vec<u8>),
    /// Remote file to download
    Remote(Url),
}

impl InputReference {
    /// Parses a reference string
    ///
    /// Inline payloads are decoded here, so a malformed payload is reported
    /// before any remote call is made.
    pub fn parse(reference: &str) -> Result<Self> {
        if let Some(rest) = reference.strip_prefix(INLINE_MARKER) {
            let (_, payload) = rest.split_once(',').ok_or_else(|| {
                WorkflowError::InvalidInputReference(
                    "inline reference has no ',' before its payload".to_string(),
                )
            })?;

            let bytes = STANDARD.decode(payload.trim()).map_err(|e| {
                WorkflowError::InvalidInputReference(format!(
                    "inline payload is not valid base64: {}",
                    e
                ))
            })?;

            return Ok(InputReference::Inline(bytes));
        }

        let url = Url::parse(reference).map_err(|e| {
            WorkflowError::InvalidInputReference(format!("'{}' is not a valid URL: {}", reference, e))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(InputReference::Remote(url)),
            scheme => Err(WorkflowError::InvalidInputReference(format!(
                "unsupported URL scheme '{}'",
                scheme
            ))),
        }
    }

    /// Raw bytes of the input, downloading remote references
    pub async fn into_bytes(self, fetcher: &dyn InputFetcher) -> Result<Vec<u8>> {
        match self {
            InputReference::Inline(bytes) => Ok(bytes),
            InputReference::Remote(url) => fetcher.fetch(&url).await,
        }
    }
}

/// Downloads remote input files
#[async_trait]
pub trait InputFetcher: Send + Sync {
    /// Fetches the whole file into memory
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>>;
}

/// HTTP implementation of InputFetcher
pub struct HttpInputFetcher {
    client: Client,
}

impl HttpInputFetcher {
    /// Creates a fetcher sharing the given HTTP client
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl InputFetcher for HttpInputFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        debug!(%url, "Fetching input file");

        let fetch_failed = |message: String| WorkflowError::InputFetchFailed {
            url: url.to_string(),
            message,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| fetch_failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_failed(format!("server answered {}", status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| fetch_failed(e.to_string()))?;

        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_reference_is_decoded() {
        let reference = InputReference::parse("data:chemical/x-pdb;base64,QVRPTSAx").unwrap();
        assert_eq!(reference, InputReference::Inline(b"ATOM 1".to_vec()));
    }

    #[test]
    fn test_inline_reference_without_separator() {
        let err = InputReference::parse("data:QVRPTSAx").unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidInputReference(_)));
    }

    #[test]
    fn test_inline_reference_with_bad_base64() {
        let err = InputReference::parse("data:text/plain;base64,@@@").unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidInputReference(_)));
    }

    #[test]
    fn test_remote_reference() {
        let reference = InputReference::parse("http://host/files/1abc.pdb").unwrap();
        assert!(
            matches!(reference, InputReference::Remote(ref url) if url.path() == "/files/1abc.pdb")
        );
    }

    #[test]
    fn test_malformed_url() {
        let err = InputReference::parse("not a url").unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidInputReference(_)));
    }

    #[test]
    fn test_unsupported_scheme() {
        let err = InputReference::parse("ftp://host/file.pdb").unwrap_err();
        assert!(err.to_string().contains("ftp"));
    }
}
