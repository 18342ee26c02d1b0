//! # herbdb-core
//!
//! Medicinal plants catalog engine: the plant data model, the catalog query
//! pipeline (text match, facet filters, safety filters, sort, pagination),
//! suggestion lookup, and flat JSON storage for plants, settings and the
//! activity log.
//!
//! This crate has no async dependencies. Every operation reads its backing
//! file fresh, so callers never hold cached catalog state between requests.

/// Global configuration constants: limits, defaults, and keyword sets.
pub mod config;
/// Query filter types: facet value sets, safety toggles, and sort keys.
pub mod filter_types;
/// Core record type: `Plant` plus create/update payloads.
pub mod plant;
/// Query pipeline, suggestion lookup, facet options, and catalog views.
pub mod search;
/// Storage layer: plant catalog, activity log, settings, atomic JSON persistence.
pub mod storage;
