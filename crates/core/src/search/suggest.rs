//! Search suggestions.
//!
//! [`suggest`] scans common names, scientific names, individual medicinal-use
//! phrases and regions for a case-insensitive substring, deduplicates, and
//! ranks: common names first, then prefix matches, then shorter values.
//! [`quick_suggestions`] and [`autocomplete`] are the lighter common-name-only
//! variants used by the search box.

use crate::config;
use crate::plant::Plant;
use serde::Serialize;
use std::collections::BTreeSet;

/// Which field a suggestion came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    CommonName,
    ScientificName,
    MedicinalUse,
    Region,
}

impl SuggestionKind {
    /// Human-readable label used in the display string.
    pub fn title(&self) -> &'static str {
        match self {
            SuggestionKind::CommonName => "Common Name",
            SuggestionKind::ScientificName => "Scientific Name",
            SuggestionKind::MedicinalUse => "Medicinal Use",
            SuggestionKind::Region => "Region",
        }
    }
}

/// A ranked suggestion: `{type, value, display}` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub value: String,
    pub display: String,
}

/// A common-name suggestion carrying the plant id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickSuggestion {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub value: String,
    pub id: String,
}

/// Ranked suggestions for `query`, at most [`config::MAX_SUGGESTIONS`].
pub fn suggest(plants: &[Plant], query: &str) -> Vec<Suggestion> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return Vec::new();
    }

    let mut found: BTreeSet<(SuggestionKind, String)> = BTreeSet::new();
    for plant in plants {
        if plant.common_name.to_lowercase().contains(&q) {
            found.insert((SuggestionKind::CommonName, plant.common_name.clone()));
        }
        if plant.scientific_name.to_lowercase().contains(&q) {
            found.insert((SuggestionKind::ScientificName, plant.scientific_name.clone()));
        }
        let uses = plant.medicinal_uses.to_lowercase();
        if uses.contains(&q) {
            for phrase in uses.split(',').map(str::trim) {
                if phrase.contains(&q) {
                    found.insert((SuggestionKind::MedicinalUse, capitalize(phrase)));
                }
            }
        }
        if plant.region.to_lowercase().contains(&q) {
            found.insert((SuggestionKind::Region, plant.region.clone()));
        }
    }

    let mut ranked: Vec<(SuggestionKind, String)> = found.into_iter().collect();
    ranked.sort_by_cached_key(|(kind, value)| {
        (
            *kind != SuggestionKind::CommonName,
            !value.to_lowercase().starts_with(&q),
            value.chars().count(),
            value.clone(),
        )
    });

    ranked
        .into_iter()
        .take(config::MAX_SUGGESTIONS)
        .map(|(kind, value)| Suggestion {
            display: format!("{} ({})", value, kind.title()),
            kind,
            value,
        })
        .collect()
}

/// Common names containing `query`, in catalog order, deduplicated, at most
/// [`config::MAX_QUICK_SUGGESTIONS`]. Queries shorter than
/// [`config::MIN_QUICK_SUGGESTION_LEN`] characters yield nothing.
pub fn quick_suggestions(plants: &[Plant], query: &str) -> Vec<QuickSuggestion> {
    let q = query.to_lowercase();
    if q.chars().count() < config::MIN_QUICK_SUGGESTION_LEN {
        return Vec::new();
    }

    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for plant in plants {
        if out.len() >= config::MAX_QUICK_SUGGESTIONS {
            break;
        }
        if plant.common_name.to_lowercase().contains(&q) && seen.insert(&plant.common_name) {
            out.push(QuickSuggestion {
                kind: "plant",
                value: plant.common_name.clone(),
                id: plant.id.clone(),
            });
        }
    }
    out
}

/// Common names containing `query`, at most [`config::MAX_AUTOCOMPLETE`].
pub fn autocomplete(plants: &[Plant], query: &str) -> Vec<String> {
    let q = query.to_lowercase();
    plants
        .iter()
        .filter(|p| p.common_name.to_lowercase().contains(&q))
        .take(config::MAX_AUTOCOMPLETE)
        .map(|p| p.common_name.clone())
        .collect()
}

/// Uppercase the first character, lowercase the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_plant(id: &str, name: &str, sci: &str, uses: &str, region: &str) -> Plant {
        Plant {
            id: id.into(),
            common_name: name.into(),
            scientific_name: sci.into(),
            medicinal_uses: uses.into(),
            region: region.into(),
            ..Default::default()
        }
    }

    fn values(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.value.as_str()).collect()
    }

    #[test]
    fn test_common_name_prefix_match() {
        let plants = vec![
            make_plant("1", "Aloe Vera", "", "", ""),
            make_plant("2", "Amla", "", "", ""),
            make_plant("3", "Ginger", "", "", ""),
        ];
        let out = suggest(&plants, "al");
        assert_eq!(values(&out), vec!["Aloe Vera"]);
        assert_eq!(out[0].kind, SuggestionKind::CommonName);
        assert_eq!(out[0].display, "Aloe Vera (Common Name)");
    }

    #[test]
    fn test_ranking_kind_then_prefix_then_length() {
        let plants = vec![
            make_plant("1", "Wild Mint", "Mentha arvensis", "", ""),
            make_plant("2", "Peppermint", "Mentha piperita", "", ""),
            make_plant("3", "Mint", "", "", "Mintaka"),
        ];
        let out = suggest(&plants, "ment");
        assert_eq!(values(&out), vec!["Mentha arvensis", "Mentha piperita"]);

        // Every common name, even an infix match, outranks a region prefix match.
        let out = suggest(&plants, "mint");
        assert_eq!(
            values(&out),
            vec!["Mint", "Wild Mint", "Peppermint", "Mintaka"]
        );
    }

    #[test]
    fn test_common_name_infix_beats_region_prefix() {
        let plants = vec![make_plant("1", "Peppermint", "", "", "Mintaka")];
        let out = suggest(&plants, "mint");
        let displays: Vec<&str> = out.iter().map(|s| s.display.as_str()).collect();
        assert_eq!(
            displays,
            vec!["Peppermint (Common Name)", "Mintaka (Region)"]
        );
    }

    #[test]
    fn test_medicinal_use_phrases_are_split_and_capitalized() {
        let plants = vec![make_plant("1", "Ginger", "", "Nausea, digestive AID, Cold", "")];
        let out = suggest(&plants, "aid");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, SuggestionKind::MedicinalUse);
        assert_eq!(out[0].value, "Digestive aid");
        assert_eq!(out[0].display, "Digestive aid (Medicinal Use)");
    }

    #[test]
    fn test_deduplicates_by_display_value() {
        let plants = vec![
            make_plant("1", "Neem", "", "", "India"),
            make_plant("2", "Neem", "", "", "India"),
        ];
        let out = suggest(&plants, "neem");
        assert_eq!(values(&out), vec!["Neem"]);
        let out = suggest(&plants, "ind");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, SuggestionKind::Region);
    }

    #[test]
    fn test_cap_and_empty_query() {
        let plants: Vec<Plant> = (0..25)
            .map(|i| make_plant(&i.to_string(), &format!("Basil {}", i), "", "", ""))
            .collect();
        assert_eq!(suggest(&plants, "basil").len(), config::MAX_SUGGESTIONS);
        assert!(suggest(&plants, "   ").is_empty());
    }

    #[test]
    fn test_quick_suggestions() {
        let plants = vec![
            make_plant("1", "Aloe Vera", "", "", ""),
            make_plant("2", "Aloe Vera", "", "", ""),
            make_plant("3", "Calendula", "", "", ""),
        ];
        let out = quick_suggestions(&plants, "AL");
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].id, "1");
        assert_eq!(out[1].value, "Calendula");
        assert!(quick_suggestions(&plants, "a").is_empty());
    }

    #[test]
    fn test_autocomplete_cap() {
        let plants: Vec<Plant> = (0..15)
            .map(|i| make_plant(&i.to_string(), &format!("Sage {}", i), "", "", ""))
            .collect();
        let out = autocomplete(&plants, "sage");
        assert_eq!(out.len(), config::MAX_AUTOCOMPLETE);
        assert_eq!(out[0], "Sage 0");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("sKIN care"), "Skin care");
        assert_eq!(capitalize(""), "");
    }
}
