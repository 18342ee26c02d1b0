//! Small read-only catalog views used by the public pages.

use crate::config;
use crate::plant::Plant;
use crate::search::filter::matches_text;
use std::cmp::Reverse;

/// The most recently added dated plants, newest first, at most [`config::FEATURED_COUNT`].
pub fn featured(plants: Vec<Plant>) -> Vec<Plant> {
    let mut dated: Vec<Plant> = plants
        .into_iter()
        .filter(|p| p.added_on().is_some())
        .collect();
    dated.sort_by_key(|p| Reverse(p.added_on()));
    dated.truncate(config::FEATURED_COUNT);
    dated
}

/// Plain text search over names and medicinal uses. A blank query returns nothing.
pub fn text_search(plants: Vec<Plant>, query: &str) -> Vec<Plant> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    plants
        .into_iter()
        .filter(|p| matches_text(p, &needle))
        .collect()
}

/// Plants for `ids` in the requested order. Unknown ids are skipped; the first
/// record wins when an id is duplicated in the catalog.
pub fn compare(plants: &[Plant], ids: &[String]) -> Vec<Plant> {
    ids.iter()
        .filter_map(|id| plants.iter().find(|p| &p.id == id).cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dated(id: usize, day: Option<u32>) -> Plant {
        Plant {
            id: id.to_string(),
            common_name: format!("Plant {}", id),
            date_added: day.map(|d| format!("2024-01-{:02}", d)),
            ..Default::default()
        }
    }

    #[test]
    fn test_featured_newest_first_and_capped() {
        let mut plants: Vec<Plant> = (1..=8).map(|i| dated(i, Some(i as u32))).collect();
        plants.push(dated(99, None));
        let out = featured(plants);
        let ids: Vec<&str> = out.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["8", "7", "6", "5", "4", "3"]);
    }

    #[test]
    fn test_text_search_blank_query() {
        let plants = vec![dated(1, None)];
        assert!(text_search(plants.clone(), "  ").is_empty());
        assert_eq!(text_search(plants, "PLANT").len(), 1);
    }

    #[test]
    fn test_compare_keeps_requested_order() {
        let plants: Vec<Plant> = (1..=4).map(|i| dated(i, None)).collect();
        let ids = vec!["3".to_string(), "missing".to_string(), "1".to_string()];
        let out = compare(&plants, &ids);
        let got: Vec<&str> = out.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(got, vec!["3", "1"]);
    }
}
