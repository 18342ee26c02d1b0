//! Prometheus metrics recording and background collection.

use herbdb_core::storage::PlantCatalog;
use metrics::{counter, gauge, histogram};
use std::time::Duration;

/// Records HTTP request metrics.
pub fn record_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];
    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());
}

/// Records a catalog write operation.
pub fn record_write_operation(operation: &str) {
    counter!("herbdb_operations_total", "operation" => operation.to_string()).increment(1);
}

/// Records a search-style read by kind (`query`, `text`, `suggest`, ...).
pub fn record_search_operation(kind: &str) {
    counter!("herbdb_search_total", "type" => kind.to_string()).increment(1);
}

/// Updates the `herbdb_plants_total` gauge. Unreadable catalogs leave it unchanged.
pub fn update_catalog_metrics(catalog: &PlantCatalog) {
    match catalog.load() {
        Ok(plants) => gauge!("herbdb_plants_total").set(plants.len() as f64),
        Err(e) => tracing::warn!(error = %e, "Skipping catalog metrics refresh"),
    }
}

/// Updates the `herbdb_catalog_size_bytes` gauge.
pub fn update_file_metrics(catalog: &PlantCatalog) {
    if let Ok(meta) = std::fs::metadata(catalog.path()) {
        gauge!("herbdb_catalog_size_bytes").set(meta.len() as f64);
    }
}
