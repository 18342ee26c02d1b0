//! Filter and sort types for catalog queries.
//!
//! Defines the facet value sets, presence/safety toggles and sort keys used by
//! the query pipeline in [`crate::search`]. All types deserialize from the JSON
//! body accepted by the search endpoint.

use crate::plant::Facet;
use serde::{Deserialize, Serialize};

/// Filters applied after text matching. Facets are AND-ed across fields and
/// OR-ed within a field's value list. Empty lists and `false` toggles are no-ops.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct QueryFilters {
    #[serde(default)]
    pub region: Vec<String>,
    #[serde(default)]
    pub habitat: Vec<String>,
    #[serde(default)]
    pub preparation_method: Vec<String>,
    #[serde(default)]
    pub parts_used: Vec<String>,
    #[serde(default)]
    pub medicinal_uses: Vec<String>,
    /// Keep only plants with a non-empty image reference.
    #[serde(default)]
    pub has_image: bool,
    /// Drop plants whose precautions mention pregnancy, lactation or breastfeeding.
    #[serde(default)]
    pub safe_pregnancy: bool,
    /// Drop plants whose precautions mention interactions.
    #[serde(default)]
    pub no_interactions: bool,
}

impl QueryFilters {
    /// Returns the accepted values for a facet.
    pub fn values(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Region => &self.region,
            Facet::Habitat => &self.habitat,
            Facet::PreparationMethod => &self.preparation_method,
            Facet::PartsUsed => &self.parts_used,
            Facet::MedicinalUses => &self.medicinal_uses,
        }
    }
}

/// Result ordering. Unknown keys fall back to `Relevance`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum SortKey {
    /// Insertion order; no ranking is performed.
    #[default]
    Relevance,
    NameAsc,
    NameDesc,
    Newest,
    MostViewed,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Relevance => "relevance",
            SortKey::NameAsc => "name",
            SortKey::NameDesc => "name-desc",
            SortKey::Newest => "newest",
            SortKey::MostViewed => "popular",
        }
    }
}

impl From<&str> for SortKey {
    fn from(s: &str) -> Self {
        match s {
            "name" => SortKey::NameAsc,
            "name-desc" => SortKey::NameDesc,
            "newest" => SortKey::Newest,
            "popular" => SortKey::MostViewed,
            _ => SortKey::Relevance,
        }
    }
}

impl From<String> for SortKey {
    fn from(s: String) -> Self {
        SortKey::from(s.as_str())
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.as_str().to_string()
    }
}
