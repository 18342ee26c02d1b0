//! herbdb-server: HTTP server for the herbdb medicinal plants catalog.
//!
//! Provides the REST API. Catalog logic and storage live in `herbdb-core`.

/// REST API layer: Axum router, HTTP handlers, models, audit, metrics.
pub mod api;
