mod config;
mod kv;

pub use config::Config;
pub use kv::{KvStore, MemoryStore, SqliteStore};

use std::path::PathBuf;

/// Returns `~/.config/habitdeck[-dev]/` based on HABITDECK_ENV.
///
/// Set HABITDECK_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("HABITDECK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("habitdeck-dev")
    } else {
        base_dir.join("habitdeck")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
