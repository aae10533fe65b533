//! Bundle DTOs
//!
//! Form payloads for bundle editing and the owner substance listing.

use serde::{Deserialize, Serialize};

use crate::domain::bundle::SubstanceRecord;

/// Request to create a new bundle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBundle {
    pub description: String,
    /// Acting username, recorded by the service as the bundle source
    #[serde(rename = "source")]
    pub username: String,
    #[serde(rename = "substanceOwner")]
    pub substance_owner_id: String,
}

/// Request to add a substance to a bundle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachSubstance {
    pub substance_uri: String,
    pub command: BundleCommand,
}

/// Request to add a property category to a bundle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachProperty {
    #[serde(rename = "topcategory")]
    pub top_category: String,
    #[serde(rename = "endpointcategory")]
    pub sub_category: String,
    pub command: BundleCommand,
}

/// Bundle edit command; only additions are issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleCommand {
    Add,
}

/// Substances owned by a substance owner
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OwnerSubstances {
    #[serde(default)]
    pub substance: Vec<SubstanceRecord>,
}

impl OwnerSubstances {
    /// Identifiers of every listed substance that carries one
    pub fn substance_ids(&self) -> Vec<String> {
        self.substance
            .iter()
            .filter_map(SubstanceRecord::substance_id)
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_substance_ids_skip_anonymous_entries() {
        let listing: OwnerSubstances = serde_json::from_str(
            r#"{"substance":[{"URI":"u1"},{"name":"no id"},{"i5uuid":"S-2"}]}"#,
        )
        .unwrap();

        assert_eq!(listing.substance_ids(), vec!["u1", "S-2"]);
    }

    #[test]
    fn test_attach_property_form_names() {
        let form = serde_json::to_value(AttachProperty {
            top_category: "TOX".to_string(),
            sub_category: "TO_ACUTE_ORAL_SECTION".to_string(),
            command: BundleCommand::Add,
        })
        .unwrap();

        assert_eq!(form["topcategory"], "TOX");
        assert_eq!(form["endpointcategory"], "TO_ACUTE_ORAL_SECTION");
        assert_eq!(form["command"], "add");
    }
}
