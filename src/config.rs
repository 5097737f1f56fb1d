//! Configuration management for threadline.
//!
//! Configuration lives in a TOML file under the user's config directory
//! (`~/.config/threadline/config.toml` on Linux). Every field has a
//! default, so a missing file or a partial file are both valid.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::conversation::{LinkPolicy, NormalizeOptions};
use crate::history::{HistoryOptions, DEFAULT_CHUNK_CHARS, DEFAULT_MAX_CHARS};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub normalize: NormalizeConfig,
    pub history: HistoryConfig,
}

/// `[normalize]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// `truncate` keeps the reachable part of a broken path, `strict` fails
    pub link_policy: LinkPolicy,
}

/// `[history]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub max_chars: usize,
    pub timestamps: bool,
    pub chunk_chars: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            timestamps: false,
            chunk_chars: DEFAULT_CHUNK_CHARS,
        }
    }
}

impl Config {
    /// Path of the default config file.
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("threadline").join("config.toml"))
    }

    /// Load from the default location, falling back to defaults when the
    /// file does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse TOML config content.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from `path` if given, otherwise from the default location.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        }
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            link_policy: self.normalize.link_policy,
        }
    }

    pub fn history_options(&self) -> HistoryOptions {
        HistoryOptions {
            max_chars: self.history.max_chars,
            timestamps: self.history.timestamps,
        }
    }
}
