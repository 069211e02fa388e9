//! Price prediction endpoint

use axum::extract::State;
use axum::Json;
use tracing::info;

use cp_catalog::CascadeSelector;
use cp_encoder::encode;
use cp_types::{AppError, Selection};

use crate::middleware::{ApiErrorResponse, ApiResult};
use crate::state::AppState;
use crate::types::{PredictRequest, PredictResponse};

// Form value bounds. These mirror what the form page offers and exist so a
// direct API caller cannot push the model far outside its training range.
const YEAR_RANGE: (u16, u16) = (2000, 2024);
const ODOMETER_RANGE: (u32, u32) = (5_000, 200_000);
const ENGINE_RANGE: (f32, f32) = (1.0, 5.0);

fn check_ranges(selection: &Selection) -> Result<(), ApiErrorResponse> {
    if selection.year < YEAR_RANGE.0 || selection.year > YEAR_RANGE.1 {
        return Err(ApiErrorResponse::from(AppError::InvalidInput(format!(
            "year must be between {} and {}, got {}",
            YEAR_RANGE.0, YEAR_RANGE.1, selection.year
        )))
        .with_param("year"));
    }
    if selection.odometer_km < ODOMETER_RANGE.0 || selection.odometer_km > ODOMETER_RANGE.1 {
        return Err(ApiErrorResponse::from(AppError::InvalidInput(format!(
            "odometer_km must be between {} and {}, got {}",
            ODOMETER_RANGE.0, ODOMETER_RANGE.1, selection.odometer_km
        )))
        .with_param("odometer_km"));
    }
    if selection.engine_capacity_l < ENGINE_RANGE.0 || selection.engine_capacity_l > ENGINE_RANGE.1
    {
        return Err(ApiErrorResponse::from(AppError::InvalidInput(format!(
            "engine_capacity_l must be between {} and {}, got {}",
            ENGINE_RANGE.0, ENGINE_RANGE.1, selection.engine_capacity_l
        )))
        .with_param("engine_capacity_l"));
    }
    Ok(())
}

/// POST /v1/predict
///
/// Validates numeric ranges, sanitizes the cascade, encodes, and runs the
/// model. All-or-nothing: any failure returns an error body, never a
/// partial estimate.
pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> ApiResult<Json<PredictResponse>> {
    check_ranges(&request.selection)?;

    let selector = CascadeSelector::new(&state.catalog);
    let selection = selector.sanitize(&request.selection);

    let encoded = encode(&selection, &state.schema)?;
    let price = state.model.predict(&encoded.vector)?;

    let warnings: Vec<String> = encoded
        .unknown_categories
        .iter()
        .map(|w| format!("no trained coefficient for {}", w))
        .collect();

    info!(
        "Predicted price {:.0} for {} {} ({})",
        price,
        selection.brand.as_deref().unwrap_or("?"),
        selection.model.as_deref().unwrap_or("?"),
        selection.year
    );

    Ok(Json(PredictResponse {
        price,
        currency: state.config_manager.get().pricing.currency,
        warnings,
    }))
}
