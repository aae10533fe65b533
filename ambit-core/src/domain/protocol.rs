//! Protocol category taxonomy
//!
//! Fixed enumeration of study protocol categories, each belonging to one
//! top-level category. Bundles created without explicit properties receive
//! every category here, grouped under its top category.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

/// Properties keyed by top category, each holding its sub-category names
pub type PropertyMap = BTreeMap<String, BTreeSet<String>>;

pub const TOP_PHYSCHEM: &str = "P-CHEM";
pub const TOP_ENV_FATE: &str = "ENV FATE";
pub const TOP_ECOTOX: &str = "ECOTOX";
pub const TOP_TOX: &str = "TOX";

macro_rules! protocol_categories {
    ($($variant:ident => $top:expr),+ $(,)?) => {
        /// A fine-grained study protocol category
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[allow(non_camel_case_types)]
        pub enum ProtocolCategory {
            $($variant),+
        }

        impl ProtocolCategory {
            /// Every known category, in declaration order
            pub const ALL: &'static [ProtocolCategory] = &[$(ProtocolCategory::$variant),+];

            /// Category name as the service spells it
            pub fn name(self) -> &'static str {
                match self {
                    $(ProtocolCategory::$variant => stringify!($variant)),+
                }
            }

            /// Top-level category this category is grouped under
            pub fn top_category(self) -> &'static str {
                match self {
                    $(ProtocolCategory::$variant => $top),+
                }
            }
        }
    };
}

protocol_categories! {
    GI_GENERAL_INFORM_SECTION => TOP_PHYSCHEM,
    PC_APPEARANCE_SECTION => TOP_PHYSCHEM,
    PC_MELTING_SECTION => TOP_PHYSCHEM,
    PC_BOILING_SECTION => TOP_PHYSCHEM,
    PC_DENSITY_SECTION => TOP_PHYSCHEM,
    PC_GRANULOMETRY_SECTION => TOP_PHYSCHEM,
    PC_VAPOUR_SECTION => TOP_PHYSCHEM,
    PC_PARTITION_SECTION => TOP_PHYSCHEM,
    PC_WATER_SOL_SECTION => TOP_PHYSCHEM,
    PC_SOL_ORGANIC_SECTION => TOP_PHYSCHEM,
    PC_NON_SATURATED_PH_SECTION => TOP_PHYSCHEM,
    PC_DISSOCIATION_SECTION => TOP_PHYSCHEM,
    PC_ZETA_POTENTIAL_SECTION => TOP_PHYSCHEM,
    PC_SURFACE_AREA_SECTION => TOP_PHYSCHEM,
    PC_CRYSTALLITE_SIZE_SECTION => TOP_PHYSCHEM,
    PC_UNKNOWN_SECTION => TOP_PHYSCHEM,
    TO_PHOTOTRANS_AIR_SECTION => TOP_ENV_FATE,
    TO_HYDROLYSIS_SECTION => TOP_ENV_FATE,
    TO_BIODEG_WATER_SCREEN_SECTION => TOP_ENV_FATE,
    TO_BIODEG_WATER_SIM_SECTION => TOP_ENV_FATE,
    EN_STABILITY_IN_SOIL_SECTION => TOP_ENV_FATE,
    EN_BIOACCUMULATION_SECTION => TOP_ENV_FATE,
    EN_BIOACCU_TERR_SECTION => TOP_ENV_FATE,
    EN_ADSORPTION_SECTION => TOP_ENV_FATE,
    EN_HENRY_LAW_SECTION => TOP_ENV_FATE,
    EC_FISHTOX_SECTION => TOP_ECOTOX,
    EC_CHRONFISHTOX_SECTION => TOP_ECOTOX,
    EC_DAPHNIATOX_SECTION => TOP_ECOTOX,
    EC_CHRONDAPHNIATOX_SECTION => TOP_ECOTOX,
    EC_ALGAETOX_SECTION => TOP_ECOTOX,
    EC_BACTOX_SECTION => TOP_ECOTOX,
    EC_SEDIMENTDWELLINGTOX_SECTION => TOP_ECOTOX,
    EC_SOILDWELLINGTOX_SECTION => TOP_ECOTOX,
    EC_HONEYBEESTOX_SECTION => TOP_ECOTOX,
    EC_PLANTTOX_SECTION => TOP_ECOTOX,
    EC_SOIL_MICRO_TOX_SECTION => TOP_ECOTOX,
    TO_ACUTE_ORAL_SECTION => TOP_TOX,
    TO_ACUTE_DERMAL_SECTION => TOP_TOX,
    TO_ACUTE_INHAL_SECTION => TOP_TOX,
    TO_SKIN_IRRITATION_SECTION => TOP_TOX,
    TO_EYE_IRRITATION_SECTION => TOP_TOX,
    TO_SENSITIZATION_SECTION => TOP_TOX,
    TO_REPEATED_ORAL_SECTION => TOP_TOX,
    TO_REPEATED_INHAL_SECTION => TOP_TOX,
    TO_REPEATED_DERMAL_SECTION => TOP_TOX,
    TO_GENETIC_IN_VITRO_SECTION => TOP_TOX,
    TO_GENETIC_IN_VIVO_SECTION => TOP_TOX,
    TO_CARCINOGENICITY_SECTION => TOP_TOX,
    TO_REPRODUCTION_SECTION => TOP_TOX,
    TO_DEVELOPMENTAL_SECTION => TOP_TOX,
    UNKNOWN_TOXICITY_SECTION => TOP_TOX,
}

impl std::fmt::Display for ProtocolCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

static DEFAULT_PROPERTIES: LazyLock<PropertyMap> = LazyLock::new(|| {
    let mut properties = PropertyMap::new();
    for category in ProtocolCategory::ALL {
        properties
            .entry(category.top_category().to_string())
            .or_default()
            .insert(category.name().to_string());
    }
    properties
});

/// Every known category grouped under its top category
///
/// Built on first use and shared for the rest of the process.
pub fn default_properties() -> &'static PropertyMap {
    &DEFAULT_PROPERTIES
}

/// Number of (top category, category) pairs in a property map
pub fn pair_count(properties: &PropertyMap) -> usize {
    properties.values().map(BTreeSet::len).sum()
}
