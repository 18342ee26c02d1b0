//! Catalog search primitives: the query pipeline, predicate filters,
//! suggestion lookup, facet options, and small catalog views.

/// Facet option extraction for search-page filter lists.
pub mod facets;
/// Text, facet, presence and safety predicates.
pub mod filter;
/// The filter → sort → paginate query engine.
pub mod query;
/// Ranked suggestions, quick suggestions and autocomplete.
pub mod suggest;
/// Query request, result and pagination types.
pub mod types;
/// Featured plants, plain text search, and comparison lookup.
pub mod views;

pub use facets::{facet_options, FacetOptions};
pub use query::run_query;
pub use suggest::{autocomplete, quick_suggestions, suggest, QuickSuggestion, Suggestion, SuggestionKind};
pub use types::{Pagination, QueryRequest, QueryResult};
pub use views::{compare, featured, text_search};
