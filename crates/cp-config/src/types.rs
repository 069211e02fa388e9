//! Configuration types for the carprice server.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use cp_types::{AppError, AppResult};

/// Current configuration schema version
pub const CONFIG_VERSION: u32 = 1;

/// Top-level application configuration, persisted as YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Where the reference dataset and model artifacts live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// CSV file the catalog is loaded from.
    pub dataset_path: PathBuf,
    /// Directory containing model.safetensors and model.json.
    pub model_dir: PathBuf,
    /// Feature schema the encoder follows.
    pub schema_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// ISO 4217 code reported with every estimate.
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme name for the built-in form page ("light" or "dark").
    pub theme: String,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            data: DataConfig::default(),
            server: ServerConfig::default(),
            pricing: PricingConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("data/cars.csv"),
            model_dir: PathBuf::from("data/model"),
            schema_path: PathBuf::from("data/schema.json"),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8700,
            enable_cors: true,
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: "INR".to_string(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
        }
    }
}

impl AppConfig {
    /// Reject configurations the server could not start with.
    pub fn validate(&self) -> AppResult<()> {
        if self.server.host.is_empty() {
            return Err(AppError::Config("server.host must not be empty".to_string()));
        }
        if self.pricing.currency.is_empty() {
            return Err(AppError::Config(
                "pricing.currency must not be empty".to_string(),
            ));
        }
        if !matches!(self.ui.theme.as_str(), "light" | "dark") {
            return Err(AppError::Config(format!(
                "ui.theme must be 'light' or 'dark', got '{}'",
                self.ui.theme
            )));
        }
        Ok(())
    }
}
