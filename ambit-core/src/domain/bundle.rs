//! Bundle domain types
//!
//! A bundle is a server-side collection of substances and the property
//! categories selected for them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::protocol::PropertyMap;

/// What a caller asks for when creating a bundle
///
/// `substances` and `properties` may be left empty; the bundle workflow then
/// resolves them from the substance owner and the default protocol taxonomy.
/// `bundle_uri` and `bundle_id` are filled in once the bundle exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleSpecification {
    #[serde(rename = "substanceOwner")]
    pub substance_owner_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substances: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<PropertyMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<String>,
}

impl BundleSpecification {
    /// Creates a specification for the given owner with nothing else resolved
    pub fn new(substance_owner_id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            substance_owner_id: substance_owner_id.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_substances(mut self, substances: Vec<String>) -> Self {
        self.substances = Some(substances);
        self
    }

    pub fn with_properties(mut self, properties: PropertyMap) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Explicit substances, if any were given
    ///
    /// An empty list counts as absent.
    pub fn explicit_substances(&self) -> Option<&[String]> {
        self.substances
            .as_deref()
            .filter(|substances| !substances.is_empty())
    }

    /// Explicit properties, if any were given
    ///
    /// An empty map counts as absent.
    pub fn explicit_properties(&self) -> Option<&PropertyMap> {
        self.properties
            .as_ref()
            .filter(|properties| !properties.is_empty())
    }
}

/// Substances attached to a bundle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BundleSubstances {
    #[serde(default)]
    pub substance: Vec<SubstanceRecord>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Property categories attached to a bundle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BundleProperties {
    #[serde(default)]
    pub feature: HashMap<String, serde_json::Value>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// A substance entry as listed by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubstanceRecord {
    #[serde(rename = "URI", default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub i5uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl SubstanceRecord {
    /// Identifier used when attaching the substance to a bundle
    pub fn substance_id(&self) -> Option<&str> {
        self.uri.as_deref().or(self.i5uuid.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_lists_count_as_absent() {
        let spec = BundleSpecification::new("owner", "desc")
            .with_substances(Vec::new())
            .with_properties(PropertyMap::new());

        assert!(spec.explicit_substances().is_none());
        assert!(spec.explicit_properties().is_none());
    }

    #[test]
    fn test_explicit_substances() {
        let spec = BundleSpecification::new("owner", "desc")
            .with_substances(vec!["s1".to_string(), "s2".to_string()]);

        assert_eq!(spec.explicit_substances().map(<[String]>::len), Some(2));
    }

    #[test]
    fn test_specification_wire_names() {
        let spec: BundleSpecification = serde_json::from_str(
            r#"{"substanceOwner":"ACME","description":"d","substances":["s1"]}"#,
        )
        .unwrap();

        assert_eq!(spec.substance_owner_id, "ACME");
        assert_eq!(spec.substances, Some(vec!["s1".to_string()]));
        assert!(spec.bundle_uri.is_none());
    }

    #[test]
    fn test_substance_id_prefers_uri() {
        let record: SubstanceRecord =
            serde_json::from_str(r#"{"URI":"http://host/substance/S-1","i5uuid":"S-1"}"#)
                .unwrap();
        assert_eq!(record.substance_id(), Some("http://host/substance/S-1"));
    }
}
