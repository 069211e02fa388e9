//! Loads the exported regressor and runs single-row inference.

use std::path::Path;

use candle_core::{DType, Device, Module, Tensor};
use candle_nn::{linear, Linear, VarBuilder};
use tracing::{debug, info};

use cp_encoder::FeatureSchema;
use cp_types::{AppError, AppResult};

use crate::metadata::ModelMetadata;

const DTYPE: DType = DType::F32;

/// The trained price regressor plus the metadata it shipped with.
///
/// The estimator is intentionally opaque to callers: a feature vector goes
/// in, a price comes out. Coefficients are never exposed, so the server
/// cannot grow behavior that depends on the model's internals.
#[derive(Debug)]
pub struct PriceModel {
    regressor: Linear,
    metadata: ModelMetadata,
    device: Device,
}

impl PriceModel {
    /// Load `model.safetensors` and `model.json` from a directory.
    ///
    /// Inference stays on CPU. The model is one linear layer over a few
    /// dozen inputs, so device transfer would cost more than the forward
    /// pass it accelerates.
    pub fn load(model_dir: &Path) -> AppResult<Self> {
        let metadata = ModelMetadata::load(&model_dir.join("model.json"))?;
        info!(
            "Loading price model version {} ({} input features)",
            metadata.version, metadata.feature_count
        );

        let weights_file = model_dir.join("model.safetensors");
        if !weights_file.exists() {
            return Err(AppError::DataUnavailable(format!(
                "model weights not found at {}",
                weights_file.display()
            )));
        }

        let device = Device::Cpu;
        debug!("Loading model weights from {:?}", weights_file);
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_file], DTYPE, &device).map_err(|e| {
                AppError::DataUnavailable(format!("failed to load SafeTensors: {}", e))
            })?
        };

        let regressor = linear(metadata.feature_count, 1, vb.pp("regressor")).map_err(|e| {
            AppError::DataUnavailable(format!("failed to load regressor weights: {}", e))
        })?;

        Ok(Self { regressor, metadata, device })
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Cross-check the model against the feature schema it will be fed from.
    ///
    /// Called once at startup. A width or version mismatch means the schema
    /// and weights come from different training runs, and every prediction
    /// would be garbage; refusing to start beats serving wrong numbers.
    pub fn validate_schema(&self, schema: &FeatureSchema) -> AppResult<()> {
        if schema.width() != self.metadata.feature_count {
            return Err(AppError::DataUnavailable(format!(
                "feature schema has {} slots but model expects {}",
                schema.width(),
                self.metadata.feature_count
            )));
        }
        if schema.version != self.metadata.version {
            return Err(AppError::DataUnavailable(format!(
                "feature schema version '{}' does not match model version '{}'",
                schema.version, self.metadata.version
            )));
        }
        Ok(())
    }

    /// Predict a price in currency units for one encoded feature vector.
    pub fn predict(&self, features: &[f32]) -> AppResult<f64> {
        if features.len() != self.metadata.feature_count {
            return Err(AppError::PredictionFailure(format!(
                "feature vector has {} values, model expects {}",
                features.len(),
                self.metadata.feature_count
            )));
        }

        let input = Tensor::from_slice(features, (1, features.len()), &self.device)
            .map_err(|e| AppError::PredictionFailure(format!("failed to build input: {}", e)))?;
        let output = self
            .regressor
            .forward(&input)
            .map_err(|e| AppError::PredictionFailure(format!("forward pass failed: {}", e)))?;
        let raw = output
            .flatten_all()
            .and_then(|t| t.to_vec1::<f32>())
            .map_err(|e| AppError::PredictionFailure(format!("failed to read output: {}", e)))?
            .first()
            .copied()
            .ok_or_else(|| AppError::PredictionFailure("model produced no output".to_string()))?;

        let price = self.metadata.target_transform.invert(f64::from(raw));
        if !price.is_finite() {
            return Err(AppError::PredictionFailure(format!(
                "model produced a non-finite price ({})",
                price
            )));
        }
        Ok(price)
    }
}
