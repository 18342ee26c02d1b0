//! Facet option extraction.
//!
//! Collects the distinct values offered by the search page filter lists.

use crate::plant::Plant;
use serde::Serialize;
use std::collections::BTreeSet;

/// Sorted, distinct filter values for each facet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetOptions {
    pub regions: Vec<String>,
    pub habitats: Vec<String>,
    pub preparation_methods: Vec<String>,
    pub parts_used: Vec<String>,
    /// Individual phrases from the comma-delimited `medicinal_uses` fields.
    pub medicinal_uses: Vec<String>,
}

/// Build facet options from the whole collection.
///
/// Habitats and preparation methods skip blank values; medicinal uses are
/// split on commas and trimmed.
pub fn facet_options(plants: &[Plant]) -> FacetOptions {
    let mut regions = BTreeSet::new();
    let mut habitats = BTreeSet::new();
    let mut preparation_methods = BTreeSet::new();
    let mut parts_used = BTreeSet::new();
    let mut medicinal_uses = BTreeSet::new();

    for plant in plants {
        if !plant.region.is_empty() {
            regions.insert(plant.region.as_str());
        }
        if !plant.habitat.trim().is_empty() {
            habitats.insert(plant.habitat.as_str());
        }
        if !plant.preparation_method.trim().is_empty() {
            preparation_methods.insert(plant.preparation_method.as_str());
        }
        if !plant.parts_used.is_empty() {
            parts_used.insert(plant.parts_used.as_str());
        }
        medicinal_uses.extend(plant.medicinal_use_list());
    }

    fn owned(set: BTreeSet<&str>) -> Vec<String> {
        set.into_iter().map(str::to_string).collect()
    }

    FacetOptions {
        regions: owned(regions),
        habitats: owned(habitats),
        preparation_methods: owned(preparation_methods),
        parts_used: owned(parts_used),
        medicinal_uses: owned(medicinal_uses),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facet_options_sorted_and_distinct() {
        let plants = vec![
            Plant {
                region: "Asia".into(),
                habitat: "  ".into(),
                parts_used: "Leaves".into(),
                medicinal_uses: "Fever, Skin care".into(),
                ..Default::default()
            },
            Plant {
                region: "Africa".into(),
                habitat: "Desert".into(),
                preparation_method: "Gel".into(),
                parts_used: "Leaves".into(),
                medicinal_uses: "Burns,Fever".into(),
                ..Default::default()
            },
        ];
        let options = facet_options(&plants);
        assert_eq!(options.regions, vec!["Africa", "Asia"]);
        assert_eq!(options.habitats, vec!["Desert"]);
        assert_eq!(options.preparation_methods, vec!["Gel"]);
        assert_eq!(options.parts_used, vec!["Leaves"]);
        assert_eq!(options.medicinal_uses, vec!["Burns", "Fever", "Skin care"]);
    }

    #[test]
    fn test_facet_options_empty_catalog() {
        assert_eq!(facet_options(&[]), FacetOptions::default());
    }
}
