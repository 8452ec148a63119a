//! The `Config` struct and its persistence methods.
//!
//! Covers:
//! - `load` / `save` (YAML file I/O with atomic write) at the default path
//! - `load_from` / `save_to` for explicit paths
//! - `validate` for semantic checks the YAML schema cannot express

use crate::error::ConfigError;
use crate::types::{LogLevel, ShortcutBinding};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings controlling log search behaviour and highlighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Default case sensitivity for search
    #[serde(default = "crate::defaults::bool_false")]
    pub case_sensitive: bool,

    /// Default whole-word mode for search
    #[serde(default = "crate::defaults::bool_false")]
    pub whole_word: bool,

    /// Default regex mode for search
    #[serde(default = "crate::defaults::bool_false")]
    pub use_regex: bool,

    /// Highlight color for search matches [R, G, B]
    #[serde(default = "crate::defaults::search_highlight_color")]
    pub highlight_color: [u8; 3],

    /// Highlight color for the current match [R, G, B]
    #[serde(default = "crate::defaults::search_current_highlight_color")]
    pub current_highlight_color: [u8; 3],

    /// Upper bound, in bytes, on a compiled search pattern
    #[serde(default = "crate::defaults::regex_size_limit")]
    pub regex_size_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            case_sensitive: crate::defaults::bool_false(),
            whole_word: crate::defaults::bool_false(),
            use_regex: crate::defaults::bool_false(),
            highlight_color: crate::defaults::search_highlight_color(),
            current_highlight_color: crate::defaults::search_current_highlight_color(),
            regex_size_limit: crate::defaults::regex_size_limit(),
        }
    }
}

/// Top-level logpane configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Maximum number of characters the log pane retains
    #[serde(default = "crate::defaults::buffer_capacity")]
    pub buffer_capacity: usize,

    /// Application log level
    #[serde(default = "crate::defaults::log_level")]
    pub log_level: LogLevel,

    /// Search defaults
    #[serde(default)]
    pub search: SearchConfig,

    /// Search keyboard shortcuts
    #[serde(default = "crate::defaults::shortcuts")]
    pub shortcuts: Vec<ShortcutBinding>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buffer_capacity: crate::defaults::buffer_capacity(),
            log_level: crate::defaults::log_level(),
            search: SearchConfig::default(),
            shortcuts: crate::defaults::shortcuts(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, creating it if missing.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            return Self::load_from(&config_path);
        }

        log::info!(
            "Config file not found, creating default at {:?}",
            config_path
        );
        let config = Self::default();
        if let Err(e) = config.save_to(&config_path) {
            log::error!("Failed to save default config: {}", e);
            return Err(e);
        }
        Ok(config)
    }

    /// Load and validate configuration from `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml_ng::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;

        log::info!("Config saved to {:?}", path);
        Ok(())
    }

    /// Reject values the log pane cannot operate with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_capacity == 0 {
            return Err(ConfigError::Validation(
                "buffer_capacity must be greater than zero".to_string(),
            ));
        }
        if self.search.regex_size_limit == 0 {
            return Err(ConfigError::Validation(
                "search.regex_size_limit must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("logpane")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            // ~/.config/logpane on every Unix, macOS included
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("logpane")
            } else {
                PathBuf::from(".")
            }
        }
    }
}
