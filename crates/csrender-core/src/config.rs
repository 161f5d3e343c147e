//! Rendering configuration.
//!
//! Configuration is stored in TOML and resolved in layers:
//!
//! 1. **Defaults**: markup on, four-column indents
//! 2. **Config file**: `<config dir>/csrender/config.toml` or an explicit path
//! 3. **Environment**: `CSRENDER_MARKUP` toggles markup
//!
//! ## Example Configuration File
//!
//! ```toml
//! [markup]
//! enabled = false
//!
//! [layout]
//! snippet_indent = 2
//! node_indent = 4
//! ```
//!
//! ```rust
//! use csrender_core::Config;
//!
//! let config: Config = toml::from_str("[markup]\nenabled = false\n")?;
//! assert!(!config.markup().is_enabled());
//! assert_eq!(config.layout.snippet_indent, 4);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::markup::Markup;
use crate::{Error, Result};

/// Environment variable that overrides `markup.enabled`.
pub const MARKUP_ENV: &str = "CSRENDER_MARKUP";

const CONFIG_FILE_NAME: &str = "config.toml";

/// Top-level rendering configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Markup settings.
    pub markup: MarkupConfig,
    /// Indentation settings.
    pub layout: LayoutConfig,
}

/// Whether rendered text carries concealable markup tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    /// Write tags. When off, every tag encodes as the empty string.
    pub enabled: bool,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Indentation used by the result renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Columns of indent per nesting level for snippets.
    pub snippet_indent: usize,
    /// Columns of indent per call graph depth.
    pub node_indent: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            snippet_indent: 4,
            node_indent: 4,
        }
    }
}

impl Config {
    /// The markup codec this configuration selects.
    #[must_use]
    pub const fn markup(&self) -> Markup {
        if self.markup.enabled {
            Markup::enabled()
        } else {
            Markup::disabled()
        }
    }

    /// Load from the platform config directory, or defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined or the
    /// file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            tracing::debug!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Serialization`] if it is not a valid config.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply `CSRENDER_MARKUP` from the process environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        let value = std::env::var(MARKUP_ENV).ok();
        self.with_markup_override(value.as_deref())
    }

    /// Apply a markup override value (`1/true/on/yes` or `0/false/off/no`).
    pub fn with_markup_override(mut self, value: Option<&str>) -> Result<Self> {
        let Some(value) = value else {
            return Ok(self);
        };
        self.markup.enabled = match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "on" | "yes" => true,
            "0" | "false" | "off" | "no" => false,
            other => {
                return Err(Error::Config(format!(
                    "{MARKUP_ENV} must be a boolean, got '{other}'"
                )));
            },
        };
        Ok(self)
    }

    fn config_path() -> Result<PathBuf> {
        let project_dirs = directories::ProjectDirs::from("dev", "csrender", "csrender")
            .ok_or_else(|| Error::Config("Failed to determine project directories".into()))?;
        Ok(project_dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
