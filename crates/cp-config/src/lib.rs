//! Configuration management module
//!
//! Handles loading, saving, and managing application configuration.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::Mutex as AsyncMutex;

use cp_types::AppResult;

pub mod paths;
mod storage;
pub mod types;

pub use storage::{load_config, save_config};
pub use types::*;

/// Thread-safe configuration manager
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
    config_path: PathBuf,
    /// Serializes disk writes, preventing concurrent save races
    save_mutex: Arc<AsyncMutex<()>>,
}

impl ConfigManager {
    /// Create a new configuration manager
    pub fn new(config: AppConfig, config_path: PathBuf) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            config_path,
            save_mutex: Arc::new(AsyncMutex::new(())),
        }
    }

    /// Load configuration from the default location
    pub async fn load() -> AppResult<Self> {
        let config_path = paths::config_file()?;
        let config = load_config(&config_path).await?;
        Ok(Self::new(config, config_path))
    }

    /// Load configuration with custom path
    pub async fn load_from_path(path: PathBuf) -> AppResult<Self> {
        let config = load_config(&path).await?;
        Ok(Self::new(config, path))
    }

    /// Get a read-only copy of the configuration
    pub fn get(&self) -> AppConfig {
        self.config.read().clone()
    }

    /// Update configuration with a function
    ///
    /// Updates the in-memory configuration and validates it. To persist
    /// changes, call `save()` afterwards.
    pub fn update<F>(&self, f: F) -> AppResult<()>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write();
        // Clone before mutating so we can roll back if validation fails
        let mut new_config = config.clone();
        f(&mut new_config);
        new_config.validate()?;
        *config = new_config;
        Ok(())
    }

    /// Save configuration to disk
    ///
    /// Serialized by a mutex so queued saves always write the most
    /// up-to-date in-memory state.
    pub async fn save(&self) -> AppResult<()> {
        let _guard = self.save_mutex.lock().await;
        let config = self.config.read().clone();
        save_config(&config, &self.config_path).await
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }
}
