//! Request and response data transfer objects for the REST API.
//!
//! All types derive `Serialize` and/or `Deserialize` for JSON marshalling via Axum.

use serde::{Deserialize, Serialize};

// Re-export the core payload and result types the handlers speak.
pub use herbdb_core::filter_types::*;
pub use herbdb_core::plant::{NewPlant, Plant, PlantPatch};
pub use herbdb_core::search::{
    FacetOptions, QueryRequest, QueryResult, QuickSuggestion, Suggestion,
};
pub use herbdb_core::storage::{ActivityEntry, Settings, SettingsPatch};

/// Query string `?q=` shared by the search and suggestion endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct TextQuery {
    #[serde(default)]
    pub q: String,
}

/// Query string for `GET /admin/api/logs`.
#[derive(Debug, Default, Deserialize)]
pub struct LogsQuery {
    pub limit: Option<usize>,
}

/// Request body for `POST /api/compare-plants`.
#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    #[serde(default)]
    pub plant_ids: Vec<String>,
}

/// Response body for `POST /api/compare-plants`.
#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub success: bool,
    pub plants: Vec<Plant>,
}

/// Request body for `POST /api/contact`. All fields are required and non-empty.
#[derive(Debug, Default, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// Request body for `DELETE /api/plants/bulk-delete`.
#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    #[serde(default)]
    pub ids: Vec<String>,
}

/// Request body for `POST /api/admin/plants/:id/moderate`.
#[derive(Debug, Deserialize)]
pub struct ModerateRequest {
    #[serde(default)]
    pub approved: bool,
    pub moderator: Option<String>,
}

/// Response for `GET /api/autocomplete`.
#[derive(Debug, Serialize)]
pub struct AutocompleteResponse {
    pub suggestions: Vec<String>,
}

/// Generic `{success, message}` acknowledgement.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

impl SuccessResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Acknowledgement carrying the affected plant.
#[derive(Debug, Serialize)]
pub struct PlantResponse {
    pub success: bool,
    pub message: String,
    pub plant: Plant,
}

/// Response for the delete endpoints.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
    pub deleted: usize,
}

/// Response for `POST /admin/api/plants-data`.
#[derive(Debug, Serialize)]
pub struct ReplaceResponse {
    pub success: bool,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub plants_count: usize,
    pub read_policy: String,
    pub warnings: Vec<String>,
}
