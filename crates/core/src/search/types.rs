//! Query request and result types for the catalog search pipeline.

use crate::config;
use crate::filter_types::{QueryFilters, SortKey};
use crate::plant::Plant;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A catalog query: free text, filters, ordering and page selection.
///
/// `page` and `per_page` are signed so that out-of-range values coming from
/// clients deserialize and can be clamped instead of rejected. Numeric strings
/// such as `"2"` are accepted as well.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub filters: QueryFilters,
    #[serde(default)]
    pub sort: SortKey,
    #[serde(default = "default_page", deserialize_with = "page_number")]
    pub page: i64,
    #[serde(default = "default_per_page", deserialize_with = "per_page_number")]
    pub per_page: i64,
}

fn default_page() -> i64 {
    1
}
fn default_per_page() -> i64 {
    config::DEFAULT_PER_PAGE
}

fn page_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    lenient_int(deserializer, default_page())
}

fn per_page_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    lenient_int(deserializer, default_per_page())
}

/// An integer given as a JSON number or a numeric string; null takes `fallback`.
fn lenient_int<'de, D>(deserializer: D, fallback: i64) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(fallback),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or_else(|| D::Error::custom(format!("invalid page number: {}", n))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid page number: {:?}", s))),
        other => Err(D::Error::custom(format!("invalid page number: {}", other))),
    }
}

impl Default for QueryRequest {
    fn default() -> Self {
        Self {
            query: None,
            filters: QueryFilters::default(),
            sort: SortKey::default(),
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

/// Pagination metadata derived from the total match count.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: u64,
    pub per_page: u64,
    pub total_pages: u64,
    pub has_prev: bool,
    pub has_next: bool,
}

/// One page of matching plants plus pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryResult {
    pub plants: Vec<Plant>,
    /// Matches before pagination.
    pub total: usize,
    pub pagination: Pagination,
    /// Spelling suggestion slot; never populated.
    pub did_you_mean: Option<String>,
}
