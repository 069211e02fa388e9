//! Error types and conversions

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Catalog, schema, or model artifact missing or malformed.
    /// Fatal at startup; the process does not come up without its inputs.
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// One or more required attributes were unset at encode time.
    /// Recovered locally and surfaced to the user as "fill in all fields".
    #[error("Incomplete selection, missing: {}", missing.join(", "))]
    IncompleteSelection { missing: Vec<String> },

    /// A numeric input fell outside its declared domain. Raised at the
    /// HTTP boundary, never inside the encoder.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The regression model rejected the vector or produced a non-finite
    /// output. Fatal to the request, not retried.
    #[error("Prediction failed: {0}")]
    PredictionFailure(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<AppError> for String {
    fn from(err: AppError) -> String {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_selection_message_lists_fields() {
        let err = AppError::IncompleteSelection {
            missing: vec!["Model".to_string(), "Color".to_string()],
        };
        assert_eq!(err.to_string(), "Incomplete selection, missing: Model, Color");
    }

    #[test]
    fn test_data_unavailable_message() {
        let err = AppError::DataUnavailable("dataset not found".to_string());
        assert!(err.to_string().contains("dataset not found"));
    }
}
