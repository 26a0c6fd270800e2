//! Configuration file support
//!
//! Loads settings from `$HILITE_CONFIG`, else `~/.hilite.toml`
//! (or `%USERPROFILE%\.hilite.toml` on Windows)
//!
//! Example:
//! ```toml
//! # hilite configuration
//! default-language = "python"
//! line-numbers = true
//! tab-width = 4
//! color = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::syntax::Language;

const KNOWN_KEYS: &[&str] = &["default-language", "line-numbers", "tab-width", "color"];

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Language used when a file's extension does not pick one
    pub default_language: Language,
    /// Whether to show line numbers
    pub line_numbers: bool,
    /// Tab width for display
    pub tab_width: usize,
    /// Whether to color output
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_language: Language::default(),
            line_numbers: false,
            tab_width: 4,
            color: true,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os("HILITE_CONFIG") {
            return Some(PathBuf::from(path));
        }

        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".hilite.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".hilite.toml"))
        }
    }

    /// Load configuration, falling back to defaults on any problem
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Config::default();
        };
        if !path.exists() {
            return Config::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}; using defaults", e);
                Config::default()
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse config file contents
    ///
    /// Unknown keys are logged and ignored.
    pub fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        let table: toml::Table = toml::from_str(contents)?;
        for key in table.keys().filter(|key| !KNOWN_KEYS.contains(&key.as_str())) {
            warn!(key = %key, "ignoring unknown config key");
        }

        let mut config: Config = toml::from_str(contents)?;
        config.tab_width = config.tab_width.clamp(1, 16);
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = format!(
            "# hilite configuration\n# Generated automatically\n\n{}",
            toml::to_string(self)?
        );
        fs::write(path, contents)?;
        Ok(())
    }
}
