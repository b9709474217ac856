//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the tide-config.toml file.
//! It selects the site resource and initial site, the model epoch, and the display options
//! (daylight-saving region, number of upcoming tides, refresh interval).

use crate::harmonics::DEFAULT_EPOCH;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "tide-config.toml";

/// Application configuration loaded from tide-config.toml
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Site resource and initial selection
    pub site: SiteConfig,
    /// Harmonic model settings
    #[serde(default)]
    pub model: ModelConfig,
    /// Display and refresh configuration
    pub display: DisplayConfig,
}

/// Site parameter resource configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Path of the comma-separated site parameter resource
    pub resource: String,
    /// Cyclic index of the initial site (wraps to the first record when too large)
    #[serde(default)]
    pub index: usize,
    /// Select the initial site by name instead of index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Harmonic model configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Unix timestamp that site offsets are measured from
    pub epoch: i64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            epoch: DEFAULT_EPOCH,
        }
    }
}

/// Display configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Daylight-saving region: "Europe", "US-Canada" or "None"
    pub region: String,
    /// Number of upcoming tides shown
    pub event_count: usize,
    /// Refresh tick in milliseconds
    pub tick_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            site: SiteConfig {
                resource: "tide-sites.csv".to_string(),
                index: 0,
                name: None,
            },
            model: ModelConfig::default(),
            display: DisplayConfig {
                region: "Europe".to_string(),
                event_count: 4,
                tick_ms: 1000,
            },
        }
    }
}

impl Config {
    /// Load configuration from tide-config.toml file
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!("Loaded configuration, site resource {}", config.site.resource);
                    config
                }
                Err(e) => {
                    warn!("Invalid config file format: {}", e);
                    warn!("Using default configuration");
                    Self::default()
                }
            },
            Err(_) => {
                info!("No config file found, using default configuration");
                Self::default()
            }
        }
    }

    /// Save current configuration to the given path
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        info!("Configuration saved to {}", path.as_ref().display());
        Ok(())
    }
}
