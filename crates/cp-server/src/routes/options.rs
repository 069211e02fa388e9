//! Dropdown options endpoint

use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use cp_catalog::CascadeSelector;
use cp_types::{CatalogField, Selection};

use crate::middleware::ApiResult;
use crate::state::AppState;
use crate::types::OptionsResponse;

/// Current cascade picks, all optional. Independent attributes never narrow
/// anything, so they are not accepted here.
#[derive(Debug, Default, Deserialize)]
pub struct OptionsQuery {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub car_type: Option<String>,
    pub color: Option<String>,
}

/// GET /v1/options
///
/// Returns every attribute's valid choices given the cascade picks in the
/// query string. Stale picks (a model that no longer matches the brand) are
/// cleared before options are computed, so the response is always internally
/// consistent.
pub async fn get_options(
    State(state): State<AppState>,
    Query(query): Query<OptionsQuery>,
) -> ApiResult<Json<OptionsResponse>> {
    let selection = Selection {
        brand: query.brand,
        model: query.model,
        car_type: query.car_type,
        color: query.color,
        ..Selection::default()
    };

    let selector = CascadeSelector::new(&state.catalog);
    let selection = selector.sanitize(&selection);

    let mut options = BTreeMap::new();
    for field in CatalogField::all() {
        let values: Vec<String> = selector.options_for(*field, &selection).into_iter().collect();
        options.insert(field.column().to_string(), values);
    }

    Ok(Json(OptionsResponse { options }))
}
