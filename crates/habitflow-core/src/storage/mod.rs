mod config;
pub mod json_file;

pub use config::{Config, NotificationsConfig, UiConfig, UserConfig};
pub use json_file::{load_or_default, save, LoadOutcome};

use std::path::PathBuf;

use crate::error::StoreError;

/// Returns `~/.config/habitflow[-dev]/` based on HABITFLOW_ENV.
///
/// Set HABITFLOW_ENV=dev to use the development data directory, or
/// HABITFLOW_DATA_DIR to point persistence somewhere else entirely
/// (tests use a temp dir this way).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    if let Ok(dir) = std::env::var("HABITFLOW_DATA_DIR") {
        let dir = PathBuf::from(dir);
        std::fs::create_dir_all(&dir).map_err(|source| StoreError::DataDir {
            path: dir.clone(),
            source,
        })?;
        return Ok(dir);
    }

    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("HABITFLOW_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("habitflow-dev")
    } else {
        base_dir.join("habitflow")
    };

    std::fs::create_dir_all(&dir).map_err(|source| StoreError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
