//! REST API layer built on Axum.
//!
//! Provides HTTP handlers for catalog browsing, search and suggestions, plant
//! CRUD, moderation, activity logs and site settings. Includes middleware for
//! request timeouts, rate and concurrency limits, body size limits, metrics
//! collection, audit context and request ID tracing.

/// Activity auditing: request context and the `audit` log target.
pub mod audit;
/// API error types mapped to HTTP status codes.
pub mod errors;
/// HTTP request handlers and application state.
pub mod handlers;
/// Prometheus metrics recording and background collection.
pub mod metrics;
/// Request and response data transfer objects.
pub mod models;

use axum::error_handling::HandleErrorLayer;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{middleware, Router};
use handlers::AppState;
use herbdb_core::config;
use std::time::{Duration, Instant};
use tower::buffer::BufferLayer;
use tower::limit::{ConcurrencyLimitLayer, RateLimitLayer};
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Instrument;

async fn request_id_middleware(
    req: axum::http::Request<axum::body::Body>,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    let span = tracing::info_span!("request", request_id = %request_id);
    async move {
        let mut response = next.run(req).await;
        if let Ok(value) = axum::http::HeaderValue::from_str(&request_id) {
            response
                .headers_mut()
                .insert(axum::http::HeaderName::from_static("x-request-id"), value);
        }
        response
    }
    .instrument(span)
    .await
}

async fn security_headers_middleware(
    req: axum::http::Request<axum::body::Body>,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();
    headers.insert(
        axum::http::HeaderName::from_static("x-content-type-options"),
        axum::http::HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        axum::http::HeaderName::from_static("x-frame-options"),
        axum::http::HeaderValue::from_static("DENY"),
    );
    headers.insert(
        axum::http::HeaderName::from_static("referrer-policy"),
        axum::http::HeaderValue::from_static("no-referrer"),
    );
    response
}

async fn metrics_middleware(
    req: axum::http::Request<axum::body::Body>,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let start = Instant::now();
    let response = next.run(req).await;
    metrics::record_request(&method, &path, response.status().as_u16(), start.elapsed());
    response
}

async fn audit_context_middleware(
    mut req: axum::http::Request<axum::body::Body>,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let ctx = audit::AuditContext {
        client_ip: audit::extract_client_ip(&req),
    };
    req.extensions_mut().insert(ctx);
    next.run(req).await
}

/// Builds the Axum router with all routes and middleware layers.
///
/// The middleware stack (outermost to innermost):
/// Concurrency limit → Rate limiting → Timeout → Body limit → CORS → Trace →
/// Compression → Security headers → Request ID → Metrics → Audit context.
pub fn create_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/api/plants", get(handlers::list_plants).post(handlers::add_plant))
        .route(
            "/api/plants/:id",
            get(handlers::get_plant)
                .put(handlers::update_plant)
                .delete(handlers::delete_plant),
        )
        .route("/api/search-plants", post(handlers::search_plants))
        .route("/api/search", get(handlers::text_search))
        .route("/api/suggest", get(handlers::suggest))
        .route("/api/search-suggestions", get(handlers::search_suggestions))
        .route("/api/autocomplete", get(handlers::autocomplete))
        .route("/api/compare-plants", post(handlers::compare_plants))
        .route("/api/facets", get(handlers::facets))
        .route("/api/featured", get(handlers::featured))
        .route("/api/contact", post(handlers::contact));

    let admin = Router::new()
        .route(
            "/api/plants/bulk-delete",
            delete(handlers::bulk_delete_plants),
        )
        .route(
            "/api/admin/plants/:id/moderate",
            post(handlers::moderate_plant),
        )
        .route("/admin/api/plants-data", post(handlers::replace_plants_data))
        .route("/admin/api/logs", get(handlers::activity_logs))
        .route(
            "/admin/api/settings",
            get(handlers::get_settings).post(handlers::update_settings),
        );

    Router::new()
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics_endpoint))
        .merge(public)
        .merge(admin)
        .layer(middleware::from_fn(audit_context_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(config::MAX_REQUEST_BODY_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(|err: tower::BoxError| async move {
                    if err.is::<tower::timeout::error::Elapsed>() {
                        StatusCode::REQUEST_TIMEOUT
                    } else {
                        StatusCode::TOO_MANY_REQUESTS
                    }
                }))
                .layer(BufferLayer::new(1024))
                .layer(ConcurrencyLimitLayer::new(config::MAX_CONCURRENT_REQUESTS))
                .layer(RateLimitLayer::new(
                    config::RATE_LIMIT_RPS,
                    Duration::from_secs(1),
                ))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config::REQUEST_TIMEOUT_SECS,
                ))),
        )
        .with_state(state)
}
