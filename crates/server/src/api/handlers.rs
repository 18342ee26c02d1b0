//! HTTP request handlers and shared application state.

use crate::api::audit::{audit_event, details, AuditContext};
use crate::api::errors::ApiError;
use crate::api::metrics;
use crate::api::models::*;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use herbdb_core::config;
use herbdb_core::search;
use herbdb_core::storage::Storage;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{json, Map};
use std::time::Instant;

/// Shared application state passed to every handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
    pub prometheus_handle: PrometheusHandle,
    pub start_time: Instant,
}

type Audit = Option<Extension<AuditContext>>;

fn record(
    state: &AppState,
    ctx: &Audit,
    action: &str,
    user: Option<&str>,
    d: Map<String, serde_json::Value>,
) {
    audit_event(
        &state.storage.activity,
        ctx.as_ref().map(|Extension(c)| c),
        action,
        user,
        d,
    );
}

fn validate_query_request(req: &QueryRequest) -> Result<(), ApiError> {
    if req.per_page < 1 || req.per_page > config::MAX_PER_PAGE {
        return Err(ApiError::BadRequest(format!(
            "per_page must be between 1 and {}",
            config::MAX_PER_PAGE
        )));
    }
    Ok(())
}

fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let mut warnings = Vec::new();
    let plants_count = match state.storage.catalog.load() {
        Ok(plants) => plants.len(),
        Err(e) => {
            warnings.push(format!("Catalog unreadable: {}", e));
            0
        }
    };
    let degraded = !warnings.is_empty();
    let status_code = if degraded {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    (
        status_code,
        Json(HealthResponse {
            status: if degraded { "degraded" } else { "ok" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.start_time.elapsed().as_secs(),
            plants_count,
            read_policy: state.storage.catalog.policy().to_string(),
            warnings,
        }),
    )
}

/// `GET /metrics`
pub async fn metrics_endpoint(State(state): State<AppState>) -> String {
    state.prometheus_handle.render()
}

/// `GET /api/plants`
pub async fn list_plants(State(state): State<AppState>) -> Result<Json<Vec<Plant>>, ApiError> {
    Ok(Json(state.storage.catalog.load()?))
}

/// `GET /api/plants/:id`
pub async fn get_plant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Plant>, ApiError> {
    state
        .storage
        .catalog
        .get(&id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Plant not found".into()))
}

/// `POST /api/search-plants`
pub async fn search_plants(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<QueryResult>, ApiError> {
    validate_query_request(&req)?;
    let plants = state.storage.catalog.load()?;
    let result = search::run_query(plants, &req);
    metrics::record_search_operation("query");
    tracing::debug!(
        query = req.query.as_deref().unwrap_or(""),
        sort = req.sort.as_str(),
        total = result.total,
        "Catalog query"
    );
    Ok(Json(result))
}

/// `GET /api/search?q=`
pub async fn text_search(
    State(state): State<AppState>,
    audit_ctx: Audit,
    Query(params): Query<TextQuery>,
) -> Result<Json<Vec<Plant>>, ApiError> {
    let q = params.q.trim();
    if q.is_empty() {
        return Ok(Json(Vec::new()));
    }
    let plants = search::text_search(state.storage.catalog.load()?, q);
    metrics::record_search_operation("text");
    record(&state, &audit_ctx, "search", None, details([("query", json!(q))]));
    Ok(Json(plants))
}

/// `GET /api/suggest?q=`
pub async fn suggest(
    State(state): State<AppState>,
    Query(params): Query<TextQuery>,
) -> Result<Json<Vec<Suggestion>>, ApiError> {
    if params.q.trim().is_empty() {
        return Ok(Json(Vec::new()));
    }
    let plants = state.storage.catalog.load()?;
    metrics::record_search_operation("suggest");
    Ok(Json(search::suggest(&plants, &params.q)))
}

/// `GET /api/search-suggestions?q=`
pub async fn search_suggestions(
    State(state): State<AppState>,
    Query(params): Query<TextQuery>,
) -> Result<Json<Vec<QuickSuggestion>>, ApiError> {
    if params.q.chars().count() < config::MIN_QUICK_SUGGESTION_LEN {
        return Ok(Json(Vec::new()));
    }
    let plants = state.storage.catalog.load()?;
    metrics::record_search_operation("quick_suggest");
    Ok(Json(search::quick_suggestions(&plants, &params.q)))
}

/// `GET /api/autocomplete?q=`
pub async fn autocomplete(
    State(state): State<AppState>,
    Query(params): Query<TextQuery>,
) -> Result<Json<AutocompleteResponse>, ApiError> {
    let plants = state.storage.catalog.load()?;
    metrics::record_search_operation("autocomplete");
    Ok(Json(AutocompleteResponse {
        suggestions: search::autocomplete(&plants, &params.q),
    }))
}

/// `POST /api/compare-plants`
pub async fn compare_plants(
    State(state): State<AppState>,
    Json(req): Json<CompareRequest>,
) -> Result<Json<CompareResponse>, ApiError> {
    if req.plant_ids.len() < config::MIN_COMPARE_IDS {
        return Err(ApiError::BadRequest(format!(
            "Please select at least {} plants to compare",
            config::MIN_COMPARE_IDS
        )));
    }
    let plants = state.storage.catalog.load()?;
    let ordered = search::compare(&plants, &req.plant_ids);
    if ordered.is_empty() {
        return Err(ApiError::NotFound("No matching plants found".into()));
    }
    Ok(Json(CompareResponse {
        success: true,
        plants: ordered,
    }))
}

/// `GET /api/facets`
pub async fn facets(State(state): State<AppState>) -> Result<Json<FacetOptions>, ApiError> {
    let plants = state.storage.catalog.load()?;
    Ok(Json(search::facet_options(&plants)))
}

/// `GET /api/featured`
pub async fn featured(State(state): State<AppState>) -> Result<Json<Vec<Plant>>, ApiError> {
    Ok(Json(search::featured(state.storage.catalog.load()?)))
}

/// `POST /api/contact`
pub async fn contact(
    State(state): State<AppState>,
    audit_ctx: Audit,
    Json(req): Json<ContactRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let (Some(name), Some(email), Some(message)) = (
        required(&req.name),
        required(&req.email),
        required(&req.message),
    ) else {
        return Err(ApiError::BadRequest("Missing required fields".into()));
    };

    let preview: String = message
        .chars()
        .take(config::CONTACT_LOG_PREVIEW_CHARS)
        .collect();
    record(
        &state,
        &audit_ctx,
        "contact_form",
        None,
        details([
            ("name", json!(name)),
            ("email", json!(email)),
            ("message", json!(preview)),
        ]),
    );
    Ok(Json(SuccessResponse::new("Thank you for your message!")))
}

/// `POST /api/plants`
pub async fn add_plant(
    State(state): State<AppState>,
    audit_ctx: Audit,
    Json(req): Json<NewPlant>,
) -> Result<(StatusCode, Json<Plant>), ApiError> {
    if req.common_name.trim().is_empty() || req.scientific_name.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "common_name and scientific_name are required".into(),
        ));
    }
    let plant = state.storage.catalog.insert(req)?;
    metrics::record_write_operation("insert");
    record(
        &state,
        &audit_ctx,
        "add_plant",
        None,
        details([
            ("plant_id", json!(plant.id)),
            ("plant_name", json!(plant.common_name)),
        ]),
    );
    Ok((StatusCode::CREATED, Json(plant)))
}

/// `PUT /api/plants/:id`
pub async fn update_plant(
    State(state): State<AppState>,
    audit_ctx: Audit,
    Path(id): Path<String>,
    Json(patch): Json<PlantPatch>,
) -> Result<Json<PlantResponse>, ApiError> {
    let plant = state.storage.catalog.update(&id, patch)?;
    metrics::record_write_operation("update");
    record(
        &state,
        &audit_ctx,
        "update_plant",
        None,
        details([
            ("plant_id", json!(id)),
            ("plant_name", json!(plant.common_name)),
        ]),
    );
    Ok(Json(PlantResponse {
        success: true,
        message: "Plant updated successfully".into(),
        plant,
    }))
}

/// `DELETE /api/plants/:id`
pub async fn delete_plant(
    State(state): State<AppState>,
    audit_ctx: Audit,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let deleted = state.storage.catalog.delete(&id)?;
    metrics::record_write_operation("delete");
    record(
        &state,
        &audit_ctx,
        "delete_plant",
        None,
        details([("plant_id", json!(id))]),
    );
    Ok(Json(DeleteResponse {
        success: true,
        message: "Plant deleted successfully".into(),
        deleted,
    }))
}

/// `DELETE /api/plants/bulk-delete`
pub async fn bulk_delete_plants(
    State(state): State<AppState>,
    audit_ctx: Audit,
    Json(req): Json<BulkDeleteRequest>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if req.ids.is_empty() {
        return Err(ApiError::BadRequest("No plant IDs provided".into()));
    }
    let deleted = state.storage.catalog.bulk_delete(&req.ids)?;
    metrics::record_write_operation("bulk_delete");
    record(
        &state,
        &audit_ctx,
        "bulk_delete_plants",
        None,
        details([("deleted_ids", json!(req.ids))]),
    );
    Ok(Json(DeleteResponse {
        success: true,
        message: format!("{} plants deleted successfully", deleted),
        deleted,
    }))
}

/// `POST /api/admin/plants/:id/moderate`
pub async fn moderate_plant(
    State(state): State<AppState>,
    audit_ctx: Audit,
    Path(id): Path<String>,
    Json(req): Json<ModerateRequest>,
) -> Result<Json<PlantResponse>, ApiError> {
    let plant = state
        .storage
        .catalog
        .moderate(&id, req.approved, req.moderator)?;
    metrics::record_write_operation("moderate");
    let action = if req.approved {
        "approve_plant"
    } else {
        "revoke_plant_approval"
    };
    record(
        &state,
        &audit_ctx,
        action,
        plant.moderated_by.as_deref(),
        details([
            ("plant_id", json!(id)),
            ("plant_name", json!(plant.common_name)),
        ]),
    );
    Ok(Json(PlantResponse {
        success: true,
        message: "Plant moderation status updated".into(),
        plant,
    }))
}

/// `POST /admin/api/plants-data`
pub async fn replace_plants_data(
    State(state): State<AppState>,
    audit_ctx: Audit,
    Json(plants): Json<Vec<Plant>>,
) -> Result<Json<ReplaceResponse>, ApiError> {
    let count = state.storage.catalog.replace_all(plants)?;
    metrics::record_write_operation("replace_all");
    record(
        &state,
        &audit_ctx,
        "update_plants_data",
        None,
        details([("count", json!(count))]),
    );
    Ok(Json(ReplaceResponse {
        success: true,
        count,
    }))
}

/// `GET /admin/api/logs?limit=`
pub async fn activity_logs(
    State(state): State<AppState>,
    Query(params): Query<LogsQuery>,
) -> Result<Json<Vec<ActivityEntry>>, ApiError> {
    Ok(Json(state.storage.activity.list(params.limit)?))
}

/// `GET /admin/api/settings`
pub async fn get_settings(State(state): State<AppState>) -> Result<Json<Settings>, ApiError> {
    Ok(Json(state.storage.settings.load()?))
}

/// `POST /admin/api/settings`
pub async fn update_settings(
    State(state): State<AppState>,
    audit_ctx: Audit,
    Json(patch): Json<SettingsPatch>,
) -> Result<Json<Settings>, ApiError> {
    if patch.is_empty() {
        return Err(ApiError::BadRequest("No data provided".into()));
    }
    let settings = state.storage.settings.update(patch)?;
    metrics::record_write_operation("update_settings");
    record(&state, &audit_ctx, "update_settings", None, Map::new());
    Ok(Json(settings))
}
