//! Sidecar metadata shipped next to the model weights.

use std::path::Path;

use serde::{Deserialize, Serialize};

use cp_types::{AppError, AppResult};

/// Transform applied to the target column during training. The model's raw
/// output is in transformed space; prediction applies the inverse before
/// anything user-facing sees the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetTransform {
    /// Trained on `log(1 + price)`; invert with `expm1`.
    Log1p,
    /// Trained on the raw price.
    None,
}

impl TargetTransform {
    /// Map a model output back to price space.
    pub fn invert(self, value: f64) -> f64 {
        match self {
            TargetTransform::Log1p => value.exp_m1(),
            TargetTransform::None => value,
        }
    }
}

/// Contents of `model.json`, written by the training export alongside
/// `model.safetensors`. The version string must match the feature schema it
/// was trained against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub version: String,
    pub feature_count: usize,
    pub target_transform: TargetTransform,
}

impl ModelMetadata {
    pub fn load(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::DataUnavailable(format!(
                "model metadata not found at {}: {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_str(&raw)
            .map_err(|e| AppError::DataUnavailable(format!("malformed model metadata: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metadata() {
        let meta: ModelMetadata = serde_json::from_str(
            r#"{"version": "2024-06-01", "feature_count": 67, "target_transform": "log1p"}"#,
        )
        .unwrap();
        assert_eq!(meta.version, "2024-06-01");
        assert_eq!(meta.feature_count, 67);
        assert_eq!(meta.target_transform, TargetTransform::Log1p);
    }

    #[test]
    fn test_log1p_inversion() {
        let transform = TargetTransform::Log1p;
        let price = 850_000.0_f64;
        let transformed = price.ln_1p();
        assert!((transform.invert(transformed) - price).abs() < 1e-6);
    }

    #[test]
    fn test_none_is_identity() {
        assert_eq!(TargetTransform::None.invert(42.5), 42.5);
    }
}
