//! Site configuration.
//!
//! # Responsibility
//! - Hold the tunables the page reads at startup: image base path, filter
//!   weights, picker gradient and initial scale.
//! - Decode optional JSON overrides on top of built-in defaults.
//!
//! # Invariants
//! - Every field has a default; an empty JSON object is a valid config.
//! - Tag weights are compared by normalized token, not raw spelling.

use crate::model::color::Gradient;
use crate::model::scale::ScaleTokens;
use crate::model::tag::{normalize_tag, TagToken};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_IMAGE_BASE: &str = "images";

/// Configuration load error.
#[derive(Debug)]
pub enum ConfigError {
    Decode(serde_json::Error),
    Io { path: PathBuf, source: std::io::Error },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode(err) => write!(f, "invalid site config: {err}"),
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Decode(err) => Some(err),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

/// Page-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory images resolve against, without trailing slash.
    pub image_base: String,
    /// Filter ordering weights keyed by raw tag string. Missing tags weigh 0.
    pub tag_weights: BTreeMap<String, i32>,
    /// Color stops for the theme picker strip.
    pub gradient: Gradient,
    /// Token values applied when the page starts.
    pub initial_scale: ScaleTokens,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let tag_weights = [("Web", 2), ("CMS Integration", 2), ("Animation", 1)]
            .into_iter()
            .map(|(tag, weight)| (tag.to_string(), weight))
            .collect();
        Self {
            image_base: DEFAULT_IMAGE_BASE.to_string(),
            tag_weights,
            gradient: Gradient::default(),
            initial_scale: ScaleTokens::floor(),
        }
    }
}

impl SiteConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Weight of one tag token; unlisted tags weigh 0.
    pub fn weight_of(&self, token: &TagToken) -> i32 {
        self.tag_weights
            .iter()
            .find(|(tag, _)| normalize_tag(tag).as_ref() == Some(token))
            .map(|(_, weight)| *weight)
            .unwrap_or(0)
    }

    /// Image base with any trailing slash removed.
    pub fn image_base(&self) -> &str {
        self.image_base.trim_end_matches('/')
    }
}
