//! The versioned feature schema describing the model's input layout.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use cp_types::{AppError, AppResult, CatalogField};

/// Numeric feature names the encoder knows how to source from a selection.
pub const NUMERIC_YEAR: &str = "Year";
pub const NUMERIC_ODOMETER: &str = "Odometer Reading (km)";
pub const NUMERIC_ENGINE: &str = "Engine Capacity (L)";

/// One slot of the model's input vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureEntry {
    /// Raw numeric passthrough (year, odometer, engine capacity).
    Numeric { name: String },
    /// One-hot slot: 1.0 iff the selection's value for `group` equals
    /// `category`.
    OneHot { group: String, category: String },
}

/// Ordered feature layout the model was trained on, plus each group's
/// training-time baseline categories (the dummy-encoding drop).
///
/// Versioned alongside the model artifact; `cp-model` cross-checks version
/// and entry count at startup so layout drift is a load-time error instead
/// of a silently wrong prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub version: String,
    pub features: Vec<FeatureEntry>,
    /// Categories encoded as all-zero by the training pipeline (drop-first
    /// dummies). A selected value outside categories ∪ baselines is schema
    /// drift and gets reported by the encoder.
    #[serde(default)]
    pub baselines: BTreeMap<String, Vec<String>>,
}

impl FeatureSchema {
    /// Load and validate the schema JSON next to the model artifact.
    pub fn load(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::DataUnavailable(format!(
                "feature schema not found at {}: {}",
                path.display(),
                e
            ))
        })?;
        let schema: FeatureSchema = serde_json::from_str(&raw).map_err(|e| {
            AppError::DataUnavailable(format!("malformed feature schema: {}", e))
        })?;
        schema.validate()?;
        Ok(schema)
    }

    /// Parse from a JSON string (tests and embedded fixtures).
    pub fn from_json(raw: &str) -> AppResult<Self> {
        let schema: FeatureSchema = serde_json::from_str(raw)
            .map_err(|e| AppError::DataUnavailable(format!("malformed feature schema: {}", e)))?;
        schema.validate()?;
        Ok(schema)
    }

    /// Reject schemas the encoder could not walk: empty layouts, numeric
    /// names with no selection source, one-hot groups that are not catalog
    /// attributes.
    fn validate(&self) -> AppResult<()> {
        if self.features.is_empty() {
            return Err(AppError::DataUnavailable(
                "feature schema defines no features".to_string(),
            ));
        }

        for entry in &self.features {
            match entry {
                FeatureEntry::Numeric { name } => {
                    if !matches!(name.as_str(), NUMERIC_YEAR | NUMERIC_ODOMETER | NUMERIC_ENGINE) {
                        return Err(AppError::DataUnavailable(format!(
                            "unknown numeric feature '{}' in schema",
                            name
                        )));
                    }
                }
                FeatureEntry::OneHot { group, .. } => {
                    if Self::field_for_group(group).is_none() {
                        return Err(AppError::DataUnavailable(format!(
                            "one-hot group '{}' is not a catalog attribute",
                            group
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Map a one-hot group name to its catalog attribute.
    pub fn field_for_group(group: &str) -> Option<CatalogField> {
        CatalogField::all().iter().copied().find(|f| f.column() == group)
    }

    /// Number of input slots the model expects.
    pub fn width(&self) -> usize {
        self.features.len()
    }

    /// Distinct one-hot group names, in first-appearance order.
    pub fn groups(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for entry in &self.features {
            if let FeatureEntry::OneHot { group, .. } = entry {
                if !seen.contains(&group.as_str()) {
                    seen.push(group.as_str());
                }
            }
        }
        seen
    }

    /// Whether a category is a known training-time baseline for its group.
    pub fn is_baseline(&self, group: &str, category: &str) -> bool {
        self.baselines
            .get(group)
            .map(|cats| cats.iter().any(|c| c == category))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_schema() {
        let schema = FeatureSchema::from_json(
            r#"{
                "version": "test-1",
                "features": [
                    {"kind": "numeric", "name": "Year"},
                    {"kind": "one_hot", "group": "Brand", "category": "Toyota"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(schema.width(), 2);
        assert_eq!(schema.groups(), vec!["Brand"]);
        assert!(!schema.is_baseline("Brand", "Audi"));
    }

    #[test]
    fn test_baselines_parsed() {
        let schema = FeatureSchema::from_json(
            r#"{
                "version": "test-1",
                "features": [{"kind": "one_hot", "group": "Brand", "category": "Toyota"}],
                "baselines": {"Brand": ["Audi"]}
            }"#,
        )
        .unwrap();

        assert!(schema.is_baseline("Brand", "Audi"));
        assert!(!schema.is_baseline("Brand", "Toyota"));
    }

    #[test]
    fn test_empty_schema_rejected() {
        let err = FeatureSchema::from_json(r#"{"version": "x", "features": []}"#).unwrap_err();
        assert!(matches!(err, AppError::DataUnavailable(_)));
    }

    #[test]
    fn test_unknown_numeric_rejected() {
        let err = FeatureSchema::from_json(
            r#"{"version": "x", "features": [{"kind": "numeric", "name": "Wheelbase"}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Wheelbase"));
    }

    #[test]
    fn test_unknown_group_rejected() {
        let err = FeatureSchema::from_json(
            r#"{"version": "x", "features": [{"kind": "one_hot", "group": "Trim", "category": "GT"}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Trim"));
    }

    #[test]
    fn test_shipped_schema_loads() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../data/schema.json");
        let schema = FeatureSchema::load(&path).unwrap();

        // Layout of the bundled artifact: 3 numeric slots + 64 one-hot slots.
        assert_eq!(schema.width(), 67);
        assert_eq!(
            schema.features[0],
            FeatureEntry::Numeric { name: NUMERIC_YEAR.to_string() }
        );
        assert!(schema.groups().contains(&"Brand"));
        assert!(schema.is_baseline("Transmission Type", "Automatic"));
    }
}
