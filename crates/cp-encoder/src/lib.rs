//! Feature schema and encoding
//!
//! The regression model expects its input columns in the exact order and
//! naming it was trained with. That layout lives in a versioned JSON schema
//! shipped next to the model artifact; the encoder walks it generically, so
//! adding a brand or model is a schema edit, not a code edit, and the schema
//! file stays the single source of truth for the feature layout.

pub mod encoder;
pub mod schema;

pub use encoder::{encode, Encoded};
pub use schema::{FeatureEntry, FeatureSchema};
