mod config;
pub mod database;
pub mod history;

pub use config::{AdvisorConfig, Config, PlayerConfig};
pub use database::Database;
pub use history::{HistoryRecord, HistoryStore};

use std::path::PathBuf;

/// Returns `~/.config/eyecare[-dev]/` based on EYECARE_ENV.
///
/// Set EYECARE_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("EYECARE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("eyecare-dev")
    } else {
        base_dir.join("eyecare")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
