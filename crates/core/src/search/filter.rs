//! Predicate filters for catalog queries.
//!
//! Evaluates [`QueryFilters`] against a single [`Plant`]. Facets are AND-ed
//! across fields; within a field a plant passes if **any** requested value is a
//! substring of the field, so multi-word values may partially overlap. Region,
//! habitat, preparation and parts facets compare case-sensitively; medicinal
//! uses ignore case. Safety filters scan the lowercased `precautions` text.

use crate::config;
use crate::filter_types::QueryFilters;
use crate::plant::{Facet, Plant};

/// Check if the lowercased `needle` occurs in the common name, scientific name,
/// or medicinal uses. An empty needle matches everything.
pub fn matches_text(plant: &Plant, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    plant.common_name.to_lowercase().contains(needle)
        || plant.scientific_name.to_lowercase().contains(needle)
        || plant.medicinal_uses.to_lowercase().contains(needle)
}

/// Check a single facet. An empty value list keeps every plant; otherwise the
/// field must be non-empty and contain at least one of the values.
pub fn matches_facet(plant: &Plant, facet: Facet, values: &[String]) -> bool {
    if values.is_empty() {
        return true;
    }
    let field = plant.facet(facet);
    if field.is_empty() {
        return false;
    }
    if facet == Facet::MedicinalUses {
        let field = field.to_lowercase();
        return values.iter().any(|v| field.contains(&v.to_lowercase()));
    }
    values.iter().any(|v| field.contains(v.as_str()))
}

/// Returns `true` unless the precautions mention pregnancy, lactation or breastfeeding.
pub fn is_pregnancy_safe(plant: &Plant) -> bool {
    let precautions = plant.precautions.to_lowercase();
    !config::PREGNANCY_KEYWORDS
        .iter()
        .any(|kw| precautions.contains(kw))
}

/// Returns `true` unless the precautions mention interactions.
pub fn has_no_interactions(plant: &Plant) -> bool {
    !plant
        .precautions
        .to_lowercase()
        .contains(config::INTERACTION_KEYWORD)
}

/// Check every facet, presence and safety filter.
pub fn matches_filters(plant: &Plant, filters: &QueryFilters) -> bool {
    for facet in Facet::ALL {
        if !matches_facet(plant, facet, filters.values(facet)) {
            return false;
        }
    }
    if filters.has_image && !plant.has_image() {
        return false;
    }
    if filters.safe_pregnancy && !is_pregnancy_safe(plant) {
        return false;
    }
    if filters.no_interactions && !has_no_interactions(plant) {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plant(region: &str, precautions: &str) -> Plant {
        Plant {
            id: "1".into(),
            common_name: "Aloe Vera".into(),
            scientific_name: "Aloe barbadensis".into(),
            medicinal_uses: "Burns, Skin care".into(),
            region: region.into(),
            precautions: precautions.into(),
            ..Default::default()
        }
    }

    fn values(vals: &[&str]) -> Vec<String> {
        vals.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_text_matches_any_field_case_insensitive() {
        let p = plant("Africa", "");
        assert!(matches_text(&p, "aloe"));
        assert!(matches_text(&p, "barbadensis"));
        assert!(matches_text(&p, "skin"));
        assert!(!matches_text(&p, "ginger"));
        assert!(matches_text(&p, ""));
    }

    #[test]
    fn test_facet_substring_or_membership() {
        let p = plant("North Africa, Arabia", "");
        assert!(matches_facet(&p, Facet::Region, &values(&["Africa"])));
        assert!(matches_facet(&p, Facet::Region, &values(&["Asia", "Arabia"])));
        assert!(!matches_facet(&p, Facet::Region, &values(&["Asia"])));
    }

    #[test]
    fn test_facet_is_case_sensitive() {
        let mut p = plant("Africa", "");
        p.habitat = "Desert".into();
        assert!(!matches_facet(&p, Facet::Region, &values(&["africa"])));
        assert!(!matches_facet(&p, Facet::Habitat, &values(&["desert"])));
        assert!(matches_facet(&p, Facet::Habitat, &values(&["Desert"])));
    }

    #[test]
    fn test_medicinal_uses_facet_ignores_case() {
        let p = plant("Africa", "");
        assert!(matches_facet(&p, Facet::MedicinalUses, &values(&["skin care"])));
        assert!(matches_facet(&p, Facet::MedicinalUses, &values(&["BURNS"])));
        assert!(!matches_facet(&p, Facet::MedicinalUses, &values(&["nausea"])));
    }

    #[test]
    fn test_empty_facet_set_is_noop() {
        let p = plant("", "");
        assert!(matches_facet(&p, Facet::Region, &[]));
    }

    #[test]
    fn test_empty_field_fails_non_empty_facet() {
        let p = plant("", "");
        assert!(!matches_facet(&p, Facet::Region, &values(&[""])));
    }

    #[test]
    fn test_pregnancy_keywords() {
        assert!(!is_pregnancy_safe(&plant("", "Avoid if Pregnant")));
        assert!(!is_pregnancy_safe(&plant("", "not for use during lactation")));
        assert!(!is_pregnancy_safe(&plant("", "Avoid while breastfeeding")));
        assert!(!is_pregnancy_safe(&plant("", "Unsafe in pregnancy")));
        assert!(is_pregnancy_safe(&plant("", "May cause drowsiness")));
    }

    #[test]
    fn test_interaction_keyword() {
        assert!(!has_no_interactions(&plant("", "May INTERACT with warfarin")));
        assert!(!has_no_interactions(&plant("", "Known drug interactions")));
        assert!(has_no_interactions(&plant("", "")));
    }

    #[test]
    fn test_facets_are_conjunctive() {
        let mut p = plant("Asia", "");
        p.habitat = "Tropical forest".into();
        let filters = QueryFilters {
            region: values(&["Asia"]),
            habitat: values(&["Desert"]),
            ..Default::default()
        };
        assert!(!matches_filters(&p, &filters));

        let filters = QueryFilters {
            region: values(&["Asia"]),
            habitat: values(&["Desert", "forest"]),
            ..Default::default()
        };
        assert!(matches_filters(&p, &filters));
    }

    #[test]
    fn test_has_image_filter() {
        let mut p = plant("Asia", "");
        let filters = QueryFilters {
            has_image: true,
            ..Default::default()
        };
        assert!(!matches_filters(&p, &filters));
        p.image_url = Some("/static/images/aloe.jpg".into());
        assert!(matches_filters(&p, &filters));
    }
}
