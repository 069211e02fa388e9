//! OS-specific path resolution for configuration files

use std::path::PathBuf;

use cp_types::{AppError, AppResult};

/// Get the configuration directory
///
/// Priority:
/// 1. Runtime override via `CARPRICE_ENV` environment variable: `~/.carprice-{env}/`
/// 2. Development mode (debug builds): `~/.carprice-dev/`
/// 3. Production mode (release builds): `~/.carprice/`
pub fn config_dir() -> AppResult<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| AppError::Config("Could not determine home directory".to_string()))?;

    // Runtime override via environment variable (for testing)
    if let Ok(env_suffix) = std::env::var("CARPRICE_ENV") {
        return Ok(home.join(format!(".carprice-{}", env_suffix)));
    }

    #[cfg(debug_assertions)]
    let dir = home.join(".carprice-dev");

    #[cfg(not(debug_assertions))]
    let dir = home.join(".carprice");

    Ok(dir)
}

/// Get the configuration file path
pub fn config_file() -> AppResult<PathBuf> {
    Ok(config_dir()?.join("settings.yaml"))
}

/// Get the logs directory
pub fn logs_dir() -> AppResult<PathBuf> {
    Ok(config_dir()?.join("logs"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir_exists(path: &PathBuf) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| {
            AppError::Config(format!(
                "Failed to create directory {}: {}",
                path.display(),
                e
            ))
        })?;
    }
    Ok(())
}
