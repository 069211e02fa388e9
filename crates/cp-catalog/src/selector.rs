//! Cascading selection over the catalog.
//!
//! The form's dependent dropdowns (Brand → Model → Car Type → Color) must
//! only ever offer choices consistent with what is already picked, so the
//! user cannot construct a (brand, model, type, color) tuple that never
//! occurs in the reference data. Location narrows nothing and is offered
//! from the full domain, like the remaining independent attributes.

use std::collections::BTreeSet;

use tracing::debug;

use cp_types::{CatalogField, Selection, CASCADE_ORDER};

use crate::record::Catalog;

/// Computes valid dropdown options and prunes stale downstream picks.
///
/// Borrows the catalog, which is immutable after load; a selector is cheap
/// and can be created per request.
pub struct CascadeSelector<'a> {
    catalog: &'a Catalog,
}

impl<'a> CascadeSelector<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Valid options for one attribute given the current selection.
    ///
    /// For a cascaded attribute the result is filtered by every *earlier*
    /// cascade stage that has a value; later stages and the attribute's own
    /// value never constrain it. Independent attributes get the full domain.
    /// An empty result means the upstream picks admit no valid choice; the
    /// dependent dropdown goes empty and the selection stays unset.
    pub fn options_for(&self, field: CatalogField, selection: &Selection) -> BTreeSet<String> {
        let Some(stage) = CASCADE_ORDER.iter().position(|f| *f == field) else {
            return self.catalog.distinct_values(field);
        };

        let filters: Vec<(CatalogField, &str)> = CASCADE_ORDER[..stage]
            .iter()
            .filter_map(|f| selection.get(*f).map(|v| (*f, v)))
            .collect();

        self.catalog.distinct_values_filtered(field, &filters)
    }

    /// Clear any cascaded pick that is no longer valid for its upstream
    /// choices.
    ///
    /// When the user changes Brand after Model was already chosen, the old
    /// Model (and anything below it) may describe a car that does not exist.
    /// Walking the cascade top-down re-derives each stage's valid set and
    /// drops stale values, so the selection read by the encoder is always
    /// internally consistent.
    pub fn sanitize(&self, selection: &Selection) -> Selection {
        let mut cleaned = selection.clone();

        for field in CASCADE_ORDER {
            if let Some(value) = cleaned.get(field) {
                let valid = self.options_for(field, &cleaned);
                if !valid.contains(value) {
                    debug!(
                        "Clearing stale {} selection '{}' (no longer valid upstream)",
                        field.column(),
                        value
                    );
                    cleaned.set(field, None);
                }
            }
        }

        cleaned
    }
}
