//! The catalog query engine.
//!
//! Applies, in order: text match, facet filters, presence and safety filters,
//! a stable sort, and page slicing. The engine is total: empty collections,
//! out-of-range pages and empty filter sets all produce a well-formed result.

use crate::filter_types::SortKey;
use crate::plant::Plant;
use crate::search::filter::{matches_filters, matches_text};
use crate::search::types::{Pagination, QueryRequest, QueryResult};
use std::cmp::Reverse;

/// Run a query over a freshly loaded collection.
///
/// `page < 1` is clamped to 1 and `per_page < 1` to 1. `total` counts matches
/// before pagination.
pub fn run_query(plants: Vec<Plant>, request: &QueryRequest) -> QueryResult {
    let needle = request
        .query
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();

    let mut matches: Vec<Plant> = plants
        .into_iter()
        .filter(|p| matches_text(p, &needle))
        .filter(|p| matches_filters(p, &request.filters))
        .collect();

    sort_plants(&mut matches, request.sort);

    let page = request.page.max(1) as u64;
    let per_page = request.per_page.max(1) as u64;
    let total = matches.len();
    let total_u64 = total as u64;

    let start = (page - 1).saturating_mul(per_page);
    let end = start.saturating_add(per_page);

    let plants: Vec<Plant> = if start >= total_u64 {
        Vec::new()
    } else {
        let end = end.min(total_u64) as usize;
        matches.drain(start as usize..end).collect()
    };

    QueryResult {
        plants,
        total,
        pagination: Pagination {
            current_page: page,
            per_page,
            total_pages: total_u64.div_ceil(per_page),
            has_prev: page > 1,
            has_next: end < total_u64,
        },
        did_you_mean: None,
    }
}

/// Stable sort by the requested key. `Relevance` keeps insertion order.
pub fn sort_plants(plants: &mut [Plant], key: SortKey) {
    match key {
        SortKey::Relevance => {}
        SortKey::NameAsc => plants.sort_by(|a, b| a.common_name.cmp(&b.common_name)),
        SortKey::NameDesc => plants.sort_by(|a, b| b.common_name.cmp(&a.common_name)),
        // Undated plants sort after every dated one.
        SortKey::Newest => plants.sort_by_key(|p| Reverse(p.added_on())),
        SortKey::MostViewed => plants.sort_by_key(|p| Reverse(p.view_count())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter_types::QueryFilters;

    fn make_plant(id: usize, name: &str) -> Plant {
        Plant {
            id: id.to_string(),
            common_name: name.to_string(),
            scientific_name: format!("Species {}", id),
            ..Default::default()
        }
    }

    fn make_catalog(n: usize) -> Vec<Plant> {
        (1..=n).map(|i| make_plant(i, &format!("Plant {:02}", i))).collect()
    }

    fn request(page: i64, per_page: i64) -> QueryRequest {
        QueryRequest {
            page,
            per_page,
            ..Default::default()
        }
    }

    fn names(result: &QueryResult) -> Vec<&str> {
        result.plants.iter().map(|p| p.common_name.as_str()).collect()
    }

    #[test]
    fn test_empty_query_keeps_all() {
        let result = run_query(make_catalog(5), &QueryRequest::default());
        assert_eq!(result.total, 5);
        assert_eq!(result.plants.len(), 5);
        assert!(result.did_you_mean.is_none());
    }

    #[test]
    fn test_second_page_of_fourteen() {
        let result = run_query(make_catalog(14), &request(2, 12));
        assert_eq!(result.total, 14);
        assert_eq!(result.plants.len(), 2);
        assert_eq!(names(&result), vec!["Plant 13", "Plant 14"]);
        assert_eq!(result.pagination.total_pages, 2);
        assert!(result.pagination.has_prev);
        assert!(!result.pagination.has_next);
    }

    #[test]
    fn test_first_page_has_next() {
        let result = run_query(make_catalog(14), &request(1, 12));
        assert_eq!(result.plants.len(), 12);
        assert!(!result.pagination.has_prev);
        assert!(result.pagination.has_next);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let result = run_query(make_catalog(3), &request(9, 12));
        assert!(result.plants.is_empty());
        assert_eq!(result.total, 3);
        assert_eq!(result.pagination.total_pages, 1);
        assert!(!result.pagination.has_next);
        assert!(result.pagination.has_prev);
    }

    #[test]
    fn test_non_positive_page_is_clamped() {
        let result = run_query(make_catalog(3), &request(-4, 2));
        assert_eq!(result.pagination.current_page, 1);
        assert_eq!(names(&result), vec!["Plant 01", "Plant 02"]);
        assert!(!result.pagination.has_prev);
        assert!(result.pagination.has_next);

        let result = run_query(make_catalog(3), &request(0, 2));
        assert_eq!(result.pagination.current_page, 1);
    }

    #[test]
    fn test_zero_per_page_is_clamped() {
        let result = run_query(make_catalog(3), &request(1, 0));
        assert_eq!(result.pagination.per_page, 1);
        assert_eq!(result.plants.len(), 1);
        assert_eq!(result.pagination.total_pages, 3);
    }

    #[test]
    fn test_pagination_invariants() {
        for n in [0usize, 1, 11, 12, 13, 24, 25] {
            for per_page in [1i64, 5, 12] {
                for page in 1..=4i64 {
                    let result = run_query(make_catalog(n), &request(page, per_page));
                    let pp = per_page as usize;
                    let start = (page as usize - 1) * pp;
                    assert_eq!(result.total, n);
                    assert_eq!(result.pagination.total_pages as usize, n.div_ceil(pp));
                    assert_eq!(result.pagination.has_next, start + pp < n);
                    assert_eq!(result.plants.len(), n.saturating_sub(start).min(pp));
                }
            }
        }
    }

    #[test]
    fn test_empty_collection() {
        let result = run_query(Vec::new(), &QueryRequest::default());
        assert_eq!(result.total, 0);
        assert_eq!(result.pagination.total_pages, 0);
        assert!(!result.pagination.has_next);
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let plants = vec![make_plant(1, "Neem"), make_plant(2, "Ginger")];
        for q in ["neem", "NEEM", "nEeM"] {
            let req = QueryRequest {
                query: Some(q.to_string()),
                ..Default::default()
            };
            let result = run_query(plants.clone(), &req);
            assert_eq!(result.total, 1);
            assert_eq!(names(&result), vec!["Neem"]);
        }
    }

    #[test]
    fn test_name_sort_directions_are_reversed() {
        let plants = vec![
            make_plant(1, "Turmeric"),
            make_plant(2, "Aloe Vera"),
            make_plant(3, "Neem"),
            make_plant(4, "Ginger"),
        ];
        let asc = run_query(
            plants.clone(),
            &QueryRequest {
                sort: SortKey::NameAsc,
                ..Default::default()
            },
        );
        let desc = run_query(
            plants,
            &QueryRequest {
                sort: SortKey::NameDesc,
                ..Default::default()
            },
        );
        assert_eq!(names(&asc), vec!["Aloe Vera", "Ginger", "Neem", "Turmeric"]);
        let mut reversed = names(&desc);
        reversed.reverse();
        assert_eq!(names(&asc), reversed);
    }

    #[test]
    fn test_relevance_keeps_insertion_order() {
        let plants = vec![make_plant(1, "Turmeric"), make_plant(2, "Aloe Vera")];
        let result = run_query(plants, &QueryRequest::default());
        assert_eq!(names(&result), vec!["Turmeric", "Aloe Vera"]);
    }

    #[test]
    fn test_newest_and_popular_sorts() {
        let mut a = make_plant(1, "A");
        a.date_added = Some("2023-01-01".into());
        a.views = Some(10);
        let mut b = make_plant(2, "B");
        b.date_added = Some("2024-06-01T08:30:00".into());
        let mut c = make_plant(3, "C");
        c.views = Some(300);

        let newest = run_query(
            vec![a.clone(), b.clone(), c.clone()],
            &QueryRequest {
                sort: SortKey::Newest,
                ..Default::default()
            },
        );
        assert_eq!(names(&newest), vec!["B", "A", "C"]);

        let popular = run_query(
            vec![a, b, c],
            &QueryRequest {
                sort: SortKey::MostViewed,
                ..Default::default()
            },
        );
        assert_eq!(names(&popular), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_total_counts_filtered_matches() {
        let mut plants = make_catalog(6);
        for p in plants.iter_mut().take(2) {
            p.precautions = "Avoid during pregnancy".into();
        }
        let req = QueryRequest {
            filters: QueryFilters {
                safe_pregnancy: true,
                ..Default::default()
            },
            per_page: 2,
            ..Default::default()
        };
        let result = run_query(plants, &req);
        assert_eq!(result.total, 4);
        assert_eq!(result.plants.len(), 2);
        assert_eq!(result.pagination.total_pages, 2);
        assert!(result
            .plants
            .iter()
            .all(|p| !p.precautions.contains("pregnancy")));
    }

    #[test]
    fn test_result_json_shape() {
        let result = run_query(make_catalog(1), &QueryRequest::default());
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["total"], 1);
        assert_eq!(value["pagination"]["current_page"], 1);
        assert_eq!(value["pagination"]["per_page"], 12);
        assert!(value["did_you_mean"].is_null());
        assert!(value["plants"].is_array());
    }
}
