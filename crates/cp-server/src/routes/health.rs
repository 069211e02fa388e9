//! Status snapshot endpoint

use axum::extract::State;
use axum::Json;

use crate::middleware::ApiResult;
use crate::state::AppState;
use crate::types::HealthResponse;

/// GET /v1/health
pub async fn health(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let metadata = state.model.metadata();
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        catalog_records: state.catalog.len(),
        model_version: metadata.version.clone(),
        feature_count: metadata.feature_count,
        timestamp: chrono::Utc::now(),
    }))
}
