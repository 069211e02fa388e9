//! Shared application state for the web server

use std::sync::Arc;

use cp_catalog::Catalog;
use cp_config::ConfigManager;
use cp_encoder::FeatureSchema;
use cp_model::PriceModel;

/// Shared state accessible to all request handlers.
///
/// Catalog, schema, and model are read-only after startup; cloning the
/// state clones Arcs only.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub schema: Arc<FeatureSchema>,
    pub model: Arc<PriceModel>,
    pub config_manager: Arc<ConfigManager>,
}

impl AppState {
    pub fn new(
        catalog: Arc<Catalog>,
        schema: Arc<FeatureSchema>,
        model: Arc<PriceModel>,
        config_manager: Arc<ConfigManager>,
    ) -> Self {
        Self {
            catalog,
            schema,
            model,
            config_manager,
        }
    }
}
