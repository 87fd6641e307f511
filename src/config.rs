//! Configuration management for AeroList
//!
//! Holds the settings of the demo window and the list it hosts. The
//! presentation defaults of the control itself (borderless, full-row
//! selection, ...) are fixed and live in `ControlStyle`, not here.

use crate::error::{AeroListError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Host window configuration
    pub window: WindowConfig,

    /// List view configuration
    pub list: ListConfig,
}

/// Host window settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,

    /// Window width in pixels
    pub width: u32,

    /// Window height in pixels
    pub height: u32,
}

/// A list column header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Header text
    pub name: String,

    /// Column width in pixels
    pub width: u32,
}

impl ColumnConfig {
    pub fn new(name: impl Into<String>, width: u32) -> Self {
        Self {
            name: name.into(),
            width,
        }
    }
}

/// List view behaviour settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Columns, in display order
    pub columns: Vec<ColumnConfig>,

    /// Whether right-button presses open the fast context menu
    pub enable_fast_context_menu: bool,

    /// Visual theme applied once the native control exists
    pub theme: String,

    /// Whether filtering ignores case
    pub filter_case_insensitive: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "AeroList".to_string(),
            width: 720,
            height: 480,
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            columns: vec![
                ColumnConfig::new("Name", 240),
                ColumnConfig::new("Group", 140),
                ColumnConfig::new("Size", 100),
            ],
            enable_fast_context_menu: true,
            theme: "Explorer".to_string(),
            filter_case_insensitive: true,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from the standard config location
    ///
    /// Falls back to defaults if the config file doesn't exist or is invalid.
    pub fn load() -> Self {
        let Some(config_path) = Self::config_file_path() else {
            return Self::default();
        };

        if !config_path.exists() {
            log::debug!("No config file at {:?}, using defaults", config_path);
            return Self::default();
        }

        match std::fs::read_to_string(&config_path)
            .map_err(AeroListError::from)
            .and_then(|content| Self::from_toml_str(&content))
        {
            Ok(config) => {
                log::info!("Loaded config from {:?}", config_path);
                config
            }
            Err(e) => {
                log::warn!("Ignoring config file {:?}: {}", config_path, e);
                Self::default()
            }
        }
    }

    /// Parses a TOML document; missing fields take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AeroListError::config_error(e.to_string()))
    }

    /// Returns the path to the configuration file
    pub fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("aerolist").join("config.toml"))
    }
}
