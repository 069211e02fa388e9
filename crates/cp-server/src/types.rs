//! Request and response types for the HTTP API

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use cp_types::Selection;

/// Valid dropdown choices for every attribute, keyed by column name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsResponse {
    pub options: BTreeMap<String, Vec<String>>,
}

/// Full form payload for a price estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    #[serde(flatten)]
    pub selection: Selection,
}

/// A successful price estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Estimated price in whole currency units.
    pub price: f64,
    /// ISO 4217 currency code from configuration.
    pub currency: String,
    /// Non-fatal conditions worth surfacing, such as a selected category the
    /// model has no coefficient for.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub warnings: Vec<String>,
}

/// Status snapshot for monitoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub catalog_records: usize,
    pub model_version: String,
    pub feature_count: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error body returned by all endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ApiError,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,

    #[serde(rename = "type")]
    pub error_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

impl ErrorResponse {
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiError {
                message: message.into(),
                error_type: error_type.into(),
                param: None,
            },
        }
    }

    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.error.param = Some(param.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_shape() {
        let resp = ErrorResponse::new("invalid_request_error", "year out of range")
            .with_param("year");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["error"]["type"], "invalid_request_error");
        assert_eq!(json["error"]["param"], "year");
    }

    #[test]
    fn test_predict_request_flattens_selection() {
        let req: PredictRequest = serde_json::from_str(
            r#"{
                "location": "Delhi",
                "brand": "Toyota",
                "year": 2019,
                "odometer_km": 45000,
                "engine_capacity_l": 2.8
            }"#,
        )
        .unwrap();
        assert_eq!(req.selection.brand.as_deref(), Some("Toyota"));
        assert_eq!(req.selection.year, 2019);
    }
}
