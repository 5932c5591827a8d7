// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock manager configuration
//!
//! ```toml
//! key_prefix = "app:lock:"
//! poll_interval = "5ms"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Prefix applied to resource identifiers when none is configured
pub const DEFAULT_KEY_PREFIX: &str = "redis:lock:";

/// Errors from loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid lock config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Lock manager configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    /// Prepended to every resource identifier before it reaches the store
    pub key_prefix: String,
    /// Pause between conditional-set attempts while waiting for a lock.
    /// Zero polls back to back.
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
}

impl LockConfig {
    pub fn new() -> Self {
        Self {
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            poll_interval: Duration::ZERO,
        }
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Store key for a resource
    pub fn store_key(&self, resource: &str) -> String {
        format!("{}{}", self.key_prefix, resource)
    }
}

impl Default for LockConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
