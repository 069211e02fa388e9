//! Deterministic mapping from a completed selection to the model's input
//! vector.

use std::collections::BTreeMap;

use tracing::warn;

use cp_types::{AppError, AppResult, Selection};

use crate::schema::{FeatureEntry, FeatureSchema, NUMERIC_ENGINE, NUMERIC_ODOMETER, NUMERIC_YEAR};

/// An encoded feature vector plus anything worth telling the caller about.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoded {
    /// Input slots in exact schema order.
    pub vector: Vec<f32>,
    /// `"Group=value"` for every selected category with no slot and no
    /// baseline entry, i.e. schema/dataset drift. The vector still carries
    /// an all-zero block for those groups, matching what the model saw for
    /// baseline categories at training time, but the condition is observable
    /// instead of silent.
    pub unknown_categories: Vec<String>,
}

/// Encode a selection against the model's feature schema.
///
/// Fails with `IncompleteSelection` when any categorical attribute is unset.
/// The form-level "all fields filled" precondition is re-checked here
/// because cascading can legitimately leave a stage with no valid value.
/// Numeric ranges are NOT re-checked: the HTTP boundary owns those, and the
/// encoder passes raw values through unchanged.
pub fn encode(selection: &Selection, schema: &FeatureSchema) -> AppResult<Encoded> {
    let missing = selection.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::IncompleteSelection { missing });
    }

    let mut vector = Vec::with_capacity(schema.width());
    // Group name -> whether any of its one-hot slots matched.
    let mut group_matched: BTreeMap<&str, bool> = BTreeMap::new();

    for entry in &schema.features {
        match entry {
            FeatureEntry::Numeric { name } => {
                let value = match name.as_str() {
                    NUMERIC_YEAR => f32::from(selection.year),
                    NUMERIC_ODOMETER => selection.odometer_km as f32,
                    NUMERIC_ENGINE => selection.engine_capacity_l,
                    // Unreachable after schema validation.
                    other => {
                        return Err(AppError::DataUnavailable(format!(
                            "schema numeric '{}' has no selection source",
                            other
                        )))
                    }
                };
                vector.push(value);
            }
            FeatureEntry::OneHot { group, category } => {
                let field = FeatureSchema::field_for_group(group).ok_or_else(|| {
                    AppError::DataUnavailable(format!("unknown one-hot group '{}'", group))
                })?;
                // All categoricals were checked non-empty above.
                let selected = selection.get(field).unwrap_or_default();
                let hit = selected == category;
                vector.push(if hit { 1.0 } else { 0.0 });
                let matched = group_matched.entry(group.as_str()).or_insert(false);
                *matched |= hit;
            }
        }
    }

    let mut unknown_categories = Vec::new();
    for (group, matched) in &group_matched {
        if *matched {
            continue;
        }
        let field = FeatureSchema::field_for_group(group).expect("validated group");
        let selected = selection.get(field).unwrap_or_default();
        if !schema.is_baseline(group, selected) {
            warn!(
                "Selected {} '{}' has no slot in schema {} (encoding all-zero)",
                group, selected, schema.version
            );
            unknown_categories.push(format!("{}={}", group, selected));
        }
    }

    Ok(Encoded { vector, unknown_categories })
}
