//! Scoring configuration loaded from TOML.
//!
//! ```toml
//! threshold = "60"
//!
//! [weights]
//! sharpe = 2.0
//!
//! [selector]
//! direction = "both"
//! pl_type = "money"
//! sample = "in_sample"
//!
//! [[oos]]
//! date_from = "2024-03-01T00:00:00Z"
//! date_to = "2024-04-01T00:00:00Z"
//! ```
//!
//! Every section is optional. Timestamps are quoted RFC 3339 strings.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use stratscore_core::{OutOfSampleRanges, SampleSelector};

use crate::composite::{parse_threshold, CompositeWeights, FilterError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Threshold(#[from] FilterError),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub weights: CompositeWeights,

    /// Kept as text so a malformed value is reported where it is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<String>,

    pub selector: SampleSelector,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub oos: Option<OutOfSampleRanges>,
}

impl ScoreConfig {
    /// Load a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), selector = ?config.selector, "loaded score config");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The configured threshold, parsed. `None` when no threshold is set.
    pub fn threshold_value(&self) -> Result<Option<f64>, ConfigError> {
        self.threshold
            .as_deref()
            .map(parse_threshold)
            .transpose()
            .map_err(ConfigError::from)
    }
}
