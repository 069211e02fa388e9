//! Configuration storage - loading and saving YAML files

use std::path::Path;

use tokio::fs;
use tracing::{debug, info};

use cp_types::{AppError, AppResult};

use crate::paths;
use crate::types::AppConfig;

/// Load configuration from a file
///
/// If the file doesn't exist, writes and returns a default configuration so
/// a first run leaves an editable settings file behind.
pub async fn load_config(path: &Path) -> AppResult<AppConfig> {
    if let Some(parent) = path.parent() {
        paths::ensure_dir_exists(&parent.to_path_buf())?;
    }

    if !path.exists() {
        info!(
            "Configuration file not found at {:?}, creating default configuration",
            path
        );
        let default_config = AppConfig::default();
        save_config(&default_config, path).await?;
        return Ok(default_config);
    }

    debug!("Loading configuration from {:?}", path);
    let contents = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::Config(format!("Failed to read configuration file: {}", e)))?;

    let config: AppConfig = serde_yaml::from_str(&contents)
        .map_err(|e| AppError::Config(format!("Failed to parse configuration YAML: {}", e)))?;

    config.validate()?;
    info!("Configuration loaded successfully from {:?}", path);
    Ok(config)
}

/// Save configuration to a file
pub async fn save_config(config: &AppConfig, path: &Path) -> AppResult<()> {
    debug!("Saving configuration to {:?}", path);

    if let Some(parent) = path.parent() {
        paths::ensure_dir_exists(&parent.to_path_buf())?;
    }

    let yaml = serde_yaml::to_string(config)
        .map_err(|e| AppError::Config(format!("Failed to serialize configuration: {}", e)))?;

    fs::write(path, yaml)
        .await
        .map_err(|e| AppError::Config(format!("Failed to write configuration file: {}", e)))?;

    Ok(())
}
