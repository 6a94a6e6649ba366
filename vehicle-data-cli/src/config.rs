//! Configuration loading and parsing

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use vehicle_data::{ExtensionConfig, VehicleField};

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub replay: ReplayConfig,
    #[serde(default)]
    pub extension: ExtensionConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReplayConfig {
    /// JSON-lines file of telemetry notifications
    pub telemetry: Option<PathBuf>,
    /// Field ids whose hat block is polled every tick (empty = whole menu)
    #[serde(default)]
    pub watch: Vec<String>,
    /// Scheduler ticks to run after each notification
    pub ticks_per_update: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Report destination (default: stdout)
    pub file: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("ticks_per_update must be at least 1")]
    ZeroTicks,

    #[error(transparent)]
    Field(#[from] vehicle_data::ExtensionError),
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    config
        .replay
        .watched_fields()
        .with_context(|| format!("Invalid watch list in {:?}", path))?;

    Ok(config)
}

impl ReplayConfig {
    /// Parse the watch list; an empty list means every menu field
    pub fn watched_fields(&self) -> std::result::Result<Vec<VehicleField>, ConfigError> {
        parse_fields(&self.watch)
    }
}

/// Parse field ids, defaulting to the menu fields when `ids` is empty
pub fn parse_fields(ids: &[String]) -> std::result::Result<Vec<VehicleField>, ConfigError> {
    if ids.is_empty() {
        return Ok(VehicleField::menu_fields().collect());
    }

    let mut fields = Vec::with_capacity(ids.len());
    for id in ids {
        let field = id.parse::<VehicleField>()?;
        if !fields.contains(&field) {
            fields.push(field);
        }
    }
    Ok(fields)
}

/// Validate a tick count from the command line or config
pub fn check_ticks(ticks: usize) -> std::result::Result<usize, ConfigError> {
    if ticks == 0 {
        Err(ConfigError::ZeroTicks)
    } else {
        Ok(ticks)
    }
}
