//! Core record types for herbdb.
//!
//! A `Plant` is one entry of the catalog as stored in `plants.json`. Text
//! fields default to the empty string so partially filled records from older
//! files still load. Keys the catalog does not model are kept in
//! [`Plant::extra`] and written back untouched. `NewPlant` and `PlantPatch` are
//! the create and update payloads applied by
//! [`PlantCatalog`](crate::storage::PlantCatalog).

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A categorical plant field that facet filters and facet options operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Region,
    Habitat,
    PreparationMethod,
    PartsUsed,
    MedicinalUses,
}

impl Facet {
    /// All facets, in the order filters are applied.
    pub const ALL: [Facet; 5] = [
        Facet::Region,
        Facet::Habitat,
        Facet::PreparationMethod,
        Facet::PartsUsed,
        Facet::MedicinalUses,
    ];
}

/// A medicinal plant record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    /// Identifier, unique by convention only. Numeric ids are read as strings.
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub common_name: String,
    #[serde(default)]
    pub scientific_name: String,
    /// Comma-delimited list of uses, e.g. `"Burns, Skin care"`.
    #[serde(default)]
    pub medicinal_uses: String,
    #[serde(default)]
    pub preparation_method: String,
    #[serde(default)]
    pub parts_used: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub habitat: String,
    /// Free text scanned by the safety filters.
    #[serde(default)]
    pub precautions: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Stored as written; see [`Plant::added_on`] for the parsed date.
    #[serde(
        default,
        deserialize_with = "raw_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_added: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moderated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moderated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moderated_at: Option<String>,
    /// Fields without a dedicated slot, preserved across rewrites.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Plant {
    /// Returns the raw string of a facet field.
    pub fn facet(&self, facet: Facet) -> &str {
        match facet {
            Facet::Region => &self.region,
            Facet::Habitat => &self.habitat,
            Facet::PreparationMethod => &self.preparation_method,
            Facet::PartsUsed => &self.parts_used,
            Facet::MedicinalUses => &self.medicinal_uses,
        }
    }

    /// Returns `true` if the plant carries a non-empty image reference.
    pub fn has_image(&self) -> bool {
        self.image_url.as_deref().is_some_and(|url| !url.is_empty())
    }

    /// Splits `medicinal_uses` on commas, trimming whitespace and dropping blanks.
    pub fn medicinal_use_list(&self) -> impl Iterator<Item = &str> + '_ {
        self.medicinal_uses
            .split(',')
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }

    /// View count, treating a missing value as zero.
    pub fn view_count(&self) -> u64 {
        self.views.unwrap_or(0)
    }

    /// The day the plant was added. Full timestamps are read by their date
    /// prefix; blank or malformed values yield `None`.
    pub fn added_on(&self) -> Option<NaiveDate> {
        let s = self.date_added.as_deref()?.trim();
        let date_part = s.get(..10).unwrap_or(s);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }
}

/// Accepts a string or a number id. A single odd record must not make the
/// whole collection unreadable.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!("invalid plant id: {}", other))),
    }
}

fn optional_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(D::Error::custom(format!("invalid plant id: {}", other))),
    }
}

/// Keeps strings verbatim and renders any other non-null value as JSON text.
fn raw_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// Payload for adding a plant.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPlant {
    /// Explicit id; when absent the catalog assigns `len + 1`.
    #[serde(default, deserialize_with = "optional_id_string")]
    pub id: Option<String>,
    /// Required; an empty value is rejected by the API layer.
    #[serde(default)]
    pub common_name: String,
    /// Required; an empty value is rejected by the API layer.
    #[serde(default)]
    pub scientific_name: String,
    #[serde(default)]
    pub medicinal_uses: String,
    #[serde(default)]
    pub preparation_method: String,
    #[serde(default)]
    pub parts_used: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub habitat: String,
    #[serde(default)]
    pub precautions: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Payload for updating a plant. Only provided fields are changed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlantPatch {
    pub common_name: Option<String>,
    pub scientific_name: Option<String>,
    pub medicinal_uses: Option<String>,
    pub preparation_method: Option<String>,
    pub parts_used: Option<String>,
    pub region: Option<String>,
    pub habitat: Option<String>,
    pub precautions: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl PlantPatch {
    /// Applies every provided field to `plant`.
    pub fn apply(self, plant: &mut Plant) {
        let fields = [
            (self.common_name, &mut plant.common_name),
            (self.scientific_name, &mut plant.scientific_name),
            (self.medicinal_uses, &mut plant.medicinal_uses),
            (self.preparation_method, &mut plant.preparation_method),
            (self.parts_used, &mut plant.parts_used),
            (self.region, &mut plant.region),
            (self.habitat, &mut plant.habitat),
            (self.precautions, &mut plant.precautions),
            (self.description, &mut plant.description),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if self.image_url.is_some() {
            plant.image_url = self.image_url;
        }
    }

    /// Returns `true` if no field would change.
    pub fn is_empty(&self) -> bool {
        self.common_name.is_none()
            && self.scientific_name.is_none()
            && self.medicinal_uses.is_none()
            && self.preparation_method.is_none()
            && self.parts_used.is_none()
            && self.region.is_none()
            && self.habitat.is_none()
            && self.precautions.is_none()
            && self.description.is_none()
            && self.image_url.is_none()
    }
}
