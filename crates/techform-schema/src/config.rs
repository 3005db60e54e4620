//! # Schema Configuration
//!
//! Limits used by the user schema. Defaults are the product rules
//! (6-character passwords, at least 2 technologies, knowledge 1–100);
//! a YAML file may override any subset of them.
//!
//! ```yaml
//! password_min_len: 8
//! min_techs: 3
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Limits applied by [`crate::UserSchema`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaConfig {
    /// Minimum password length in characters.
    pub password_min_len: usize,
    /// Minimum number of technology entries.
    pub min_techs: usize,
    /// Lowest accepted knowledge level (inclusive).
    pub knowledge_min: f64,
    /// Highest accepted knowledge level (inclusive).
    pub knowledge_max: f64,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            password_min_len: 6,
            min_techs: 2,
            knowledge_min: 1.0,
            knowledge_max: 100.0,
        }
    }
}

impl SchemaConfig {
    /// Parse and validate a YAML configuration document.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        // An empty document means "all defaults".
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML configuration file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_yaml_str(&content)
    }

    /// Check the limits are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.knowledge_min.is_finite() || !self.knowledge_max.is_finite() {
            return Err(ConfigError::NonFiniteBound);
        }
        if self.knowledge_min > self.knowledge_max {
            return Err(ConfigError::InvalidRange {
                min: self.knowledge_min,
                max: self.knowledge_max,
            });
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `knowledge_min` is above `knowledge_max`.
    #[error("knowledge range is empty: min {min} > max {max}")]
    InvalidRange {
        /// Configured lower bound.
        min: f64,
        /// Configured upper bound.
        max: f64,
    },

    /// A knowledge bound is NaN or infinite.
    #[error("knowledge bounds must be finite numbers")]
    NonFiniteBound,

    /// The YAML document is malformed or has unknown keys.
    #[error("invalid schema config: {0}")]
    Parse(String),

    /// The config file could not be read.
    #[error("cannot read schema config '{path}': {reason}")]
    Read {
        /// Path of the config file.
        path: String,
        /// Underlying IO error.
        reason: String,
    },
}
