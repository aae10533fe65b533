//! Study domain types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Studies recorded for a substance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Studies {
    #[serde(default)]
    pub study: Vec<Study>,
}

/// A single study; the protocol section is typed, results are kept raw
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Study {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default)]
    pub protocol: Protocol,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Protocol section of a study
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Protocol {
    #[serde(
        default,
        rename = "topcategory",
        skip_serializing_if = "Option::is_none"
    )]
    pub top_category: Option<String>,
    #[serde(default)]
    pub category: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub endpoint: Option<String>,
}
