//! Subcommands and the configuration lookup they share.

pub mod config;
pub mod extract;

use std::path::{Path, PathBuf};

use tracing::debug;

use roster_core::RosterConfig;

/// `<config_dir>/roster/config.json`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("roster")
        .join("config.json")
}

/// The config file in use: the `--config` path if given, else the default.
pub fn config_path(explicit: Option<&str>) -> PathBuf {
    explicit.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load the configuration, falling back to defaults when the default file
/// does not exist. An explicit path must exist.
pub fn load_config(explicit: Option<&str>) -> anyhow::Result<RosterConfig> {
    if let Some(path) = explicit {
        return Ok(RosterConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading configuration from {}", path.display());
        Ok(RosterConfig::from_file(&path)?)
    } else {
        Ok(RosterConfig::default())
    }
}
