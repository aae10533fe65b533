//! Dataset domain types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A dataset document as returned by the service
///
/// Only the fields the client inspects are typed; everything else is kept
/// verbatim in `extra` so nothing is lost when the dataset is re-serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(
        default,
        rename = "datasetURI",
        skip_serializing_if = "Option::is_none"
    )]
    pub dataset_uri: Option<String>,
    #[serde(default)]
    pub data_entry: Vec<DataEntry>,
    #[serde(default)]
    pub features: HashMap<String, serde_json::Value>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// One row of a dataset: a compound and its feature values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataEntry {
    #[serde(default)]
    pub compound: serde_json::Value,
    #[serde(default)]
    pub values: HashMap<String, serde_json::Value>,
}

impl Dataset {
    /// Number of rows in the dataset
    pub fn len(&self) -> usize {
        self.data_entry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data_entry.is_empty()
    }
}
