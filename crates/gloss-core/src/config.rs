//! Configuration management for Gloss.
//!
//! This module provides configuration loading, saving, and defaults.
//! Configuration is stored in TOML format in a platform-appropriate location.

use crate::error::{GlossError, Result};
use crate::search::SearchSettings;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Main configuration structure for Gloss.
///
/// ## Example Configuration File (gloss.toml)
///
/// ```toml
/// [general]
/// log_level = "info"
/// default_root = "/home/me/notes"
///
/// [search]
/// debounce_ms = 300
/// max_results = 100
/// max_line_chars = 200
///
/// [tree]
/// expand_depth = 1
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Content search tuning
    pub search: SearchConfig,

    /// Tree display settings
    pub tree: TreeConfig,
}

/// General configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Folder opened when no folder is given on the command line
    pub default_root: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            log_level: "info".to_string(),
            default_root: None,
        }
    }
}

/// Content search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Milliseconds to wait after the last keystroke before scanning
    pub debounce_ms: u64,

    /// Maximum number of matches per search
    pub max_results: usize,

    /// Matched lines are cut to this many characters
    pub max_line_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let settings = SearchSettings::default();
        SearchConfig {
            debounce_ms: settings.debounce.as_millis() as u64,
            max_results: settings.max_results,
            max_line_chars: settings.max_line_chars,
        }
    }
}

/// Tree configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Directory levels expanded by `gloss tree` (1 = root level only)
    pub expand_depth: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig { expand_depth: 1 }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default config if no config file exists.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Config::default());
        }

        info!(path = %path.display(), "Loading configuration");
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| GlossError::config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        info!(path = %path.display(), "Saving configuration");
        let contents = toml::to_string_pretty(self)
            .map_err(|e| GlossError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "gloss")
            .ok_or_else(|| GlossError::config("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("gloss.toml"))
    }

    /// Search settings derived from the `[search]` section.
    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            debounce: Duration::from_millis(self.search.debounce_ms),
            max_results: self.search.max_results,
            max_line_chars: self.search.max_line_chars,
        }
    }

    /// Pick the folder to open: `explicit` if given, else `default_root`.
    ///
    /// The folder must exist and be a directory.
    pub fn resolve_root(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        let root = explicit
            .map(Path::to_path_buf)
            .or_else(|| self.general.default_root.clone())
            .ok_or(GlossError::NoRoot)?;

        if !root.is_dir() {
            return Err(GlossError::InvalidRoot { path: root });
        }
        Ok(root)
    }
}
