//! Configuration module for the client
//!
//! Settings are layered: defaults, then a YAML settings file, then
//! `SEARXNG_*` environment variables. Command-line flags are applied on
//! top by the binary.

mod settings;

pub use settings::*;

use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming a settings file
pub const CONFIG_PATH_ENV: &str = "SEARXNG_CLI_CONFIG";

/// Default settings file location, if the platform has a config directory
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("searxng-cli/config.yml"))
}

/// Load settings from `path`, or from the first settings file found
pub fn load(path: Option<&Path>) -> Result<SearxngConfig> {
    let mut config = match settings_path(path) {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            SearxngConfig::from_file(&path)?
        }
        None => {
            info!("No settings file found, using defaults");
            SearxngConfig::default()
        }
    };
    config.merge_env()?;
    Ok(config)
}

/// An explicit path is always used, even if missing, so the read fails loudly
fn settings_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    default_path().filter(|p| p.exists())
}
