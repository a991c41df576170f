//! Tracer configuration
//!
//! The only knob the engine has is its n-gram order, plus the depth policy
//! that order implies unless overridden. Both can come from CLI flags or a
//! TOML file:
//!
//! ```toml
//! [tracer]
//! order = 3
//! policy = "carry-forward"   # optional, defaults per order
//! ```

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::sequence::DepthPolicy;

/// Errors for configuration loading and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid n-gram order {0}: must be >= 2")]
    InvalidOrder(usize),

    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Validated n-gram order and depth policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NgramConfig {
    order: usize,
    policy: DepthPolicy,
}

impl NgramConfig {
    /// Config for `order` with that order's default policy
    pub fn new(order: usize) -> Result<Self> {
        if order < 2 {
            return Err(ConfigError::InvalidOrder(order));
        }
        Ok(Self {
            order,
            policy: DepthPolicy::for_order(order),
        })
    }

    pub fn bigram() -> Self {
        Self {
            order: 2,
            policy: DepthPolicy::CarryForward,
        }
    }

    pub fn trigram() -> Self {
        Self {
            order: 3,
            policy: DepthPolicy::Reset,
        }
    }

    pub fn with_policy(mut self, policy: DepthPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn policy(&self) -> DepthPolicy {
        self.policy
    }

    /// Parse a `[tracer]` table from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        let config = Self::new(file.tracer.order)?;
        Ok(match file.tracer.policy {
            Some(policy) => config.with_policy(policy),
            None => config,
        })
    }

    /// Load a TOML config file from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

impl Default for NgramConfig {
    fn default() -> Self {
        Self::bigram()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    tracer: TracerSection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TracerSection {
    order: usize,
    policy: Option<DepthPolicy>,
}
