//! pagedots configuration file handling
//!
//! A `pagedots.toml` holds the indicator attributes and the pager the CLI
//! replays swipes on:
//!
//! ```toml
//! [indicator]
//! horizon_margin = 8.0
//! width = 24.0
//! height = 6.0
//! selected_color = "#2196F3"
//!
//! [pager]
//! pages = 5
//! page_width = 360.0
//! looping = true
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use pagedots_widgets::IndicatorAttrs;
use serde::{Deserialize, Serialize};

/// Default config file name
pub const CONFIG_FILE: &str = "pagedots.toml";

/// Top-level configuration
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PagedotsConfig {
    #[serde(default)]
    pub indicator: IndicatorAttrs,
    #[serde(default)]
    pub pager: PagerConfig,
}

/// Pager the swipes are replayed on
#[derive(Debug, Deserialize, Serialize)]
pub struct PagerConfig {
    /// Number of real pages
    #[serde(default = "default_pages")]
    pub pages: usize,
    /// Page width in pixels, used for `offset_pixels`
    #[serde(default = "default_page_width")]
    pub page_width: f32,
    /// Banner-style pager whose positions run past `pages`
    #[serde(default)]
    pub looping: bool,
}

fn default_pages() -> usize {
    4
}

fn default_page_width() -> f32 {
    360.0
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            pages: default_pages(),
            page_width: default_page_width(),
            looping: false,
        }
    }
}

impl PagedotsConfig {
    /// Load from `path`, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize pagedots config")
    }
}
