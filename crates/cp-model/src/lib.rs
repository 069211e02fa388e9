//! Price model loading and inference
//!
//! The regressor is a single linear layer exported from the training
//! pipeline as a SafeTensors file, with a `model.json` sidecar describing
//! the artifact version, expected input width, and the target transform
//! applied during training. Inference runs on CPU; at this size a forward
//! pass is a dot product.

pub mod metadata;
pub mod regressor;

pub use metadata::{ModelMetadata, TargetTransform};
pub use regressor::PriceModel;
