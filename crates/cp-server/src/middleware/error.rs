//! Error handling middleware mapping application errors to HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use cp_types::AppError;

use crate::types::ErrorResponse;

/// Application error that can be converted to HTTP response
pub struct ApiErrorResponse {
    pub status: StatusCode,
    pub error: ErrorResponse,
}

impl ApiErrorResponse {
    pub fn new(
        status: StatusCode,
        error_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            error: ErrorResponse::new(error_type, message),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_request_error", message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "incomplete_selection",
            message,
        )
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "service_unavailable",
            message,
        )
    }

    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.error = self.error.with_param(param);
        self
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

/// Convert AppError to ApiErrorResponse
impl From<AppError> for ApiErrorResponse {
    fn from(err: AppError) -> Self {
        match err {
            AppError::DataUnavailable(msg) => {
                ApiErrorResponse::service_unavailable(format!("Data unavailable: {}", msg))
            }
            AppError::IncompleteSelection { .. } => {
                // The Display impl lists the missing fields.
                ApiErrorResponse::unprocessable(err.to_string())
            }
            AppError::InvalidInput(msg) => ApiErrorResponse::bad_request(msg),
            AppError::PredictionFailure(msg) => {
                ApiErrorResponse::internal_error(format!("Prediction failed: {}", msg))
            }
            AppError::Config(msg) => {
                ApiErrorResponse::bad_request(format!("Configuration error: {}", msg))
            }
            AppError::Io(err) => ApiErrorResponse::internal_error(format!("IO error: {}", err)),
            AppError::Serialization(err) => {
                ApiErrorResponse::internal_error(format!("Serialization error: {}", err))
            }
        }
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiErrorResponse>;
