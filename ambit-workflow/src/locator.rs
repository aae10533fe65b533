//! Result locator parsing
//!
//! Completed tasks point at the resource they produced, e.g.
//! `http://host/ambit2/bundle/42`. The identifier is the path segment that
//! follows the resource kind.

use url::Url;

use crate::error::{Result, WorkflowError};

pub const DATASET: &str = "dataset";
pub const BUNDLE: &str = "bundle";

/// Extracts the identifier following `resource` in a locator
///
/// Query strings and fragments are ignored. Relative locators are accepted.
pub fn resource_id(locator: &str, resource: &'static str) -> Result<String> {
    let path = match Url::parse(locator) {
        Ok(url) => url.path().to_string(),
        Err(_) => locator
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    segments
        .iter()
        .rposition(|segment| *segment == resource)
        .and_then(|index| segments.get(index + 1))
        .map(|id| id.to_string())
        .ok_or_else(|| WorkflowError::MalformedLocator {
            locator: locator.to_string(),
            resource,
        })
}
