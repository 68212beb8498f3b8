//! Configuration file support
//!
//! Loads settings from ~/.lexlight.toml (or %USERPROFILE%\.lexlight.toml on Windows)
//!
//! Example:
//! ```toml
//! enabled = true
//! mode = "dirty"
//! max-lines-per-pass = 500
//!
//! [palette]
//! keyword = "#569cd6"
//! comment = "#808080"
//! current-line = "#2b2b2b"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;
use crate::highlighter::TrackingMode;
use crate::syntax::{Color, COMMENT_COLOR, CURRENT_LINE_COLOR, KEYWORD_COLOR};

/// Colors used by the built-in rule set and the current-line marker
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Palette {
    /// Foreground for keywords (drawn bold)
    pub keyword: Color,
    /// Foreground for comments
    pub comment: Color,
    /// Background of the current-line marker
    pub current_line: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            keyword: KEYWORD_COLOR,
            comment: COMMENT_COLOR,
            current_line: CURRENT_LINE_COLOR,
        }
    }
}

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Whether highlighting starts enabled
    pub enabled: bool,
    /// Which lines get recomputed after an edit
    pub mode: TrackingMode,
    /// Upper bound on dirty lines processed per notification
    pub max_lines_per_pass: usize,
    pub palette: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: TrackingMode::default(),
            max_lines_per_pass: 1000,
            palette: Palette::default(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".lexlight.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".lexlight.toml"))
        }
    }

    /// Load configuration from the default path
    ///
    /// Without a home directory the defaults are used. Otherwise see
    /// [`load_or_default`](Self::load_or_default).
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_or_default(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from `path`, never failing
    ///
    /// A missing file gives the defaults. A malformed one is logged and
    /// also gives the defaults, so a bad config never blocks editing.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(contents)?;
        config.max_lines_per_pass = config.max_lines_per_pass.max(1);
        Ok(config)
    }
}
