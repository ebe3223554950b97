//! Configuration Module
//!
//! Holds the immutable settings owned by one cache instance.

use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cache::DEFAULT_MAX_BYTES;

/// Cache configuration parameters.
///
/// Each [`crate::FsCache`] owns its own copy, so differently configured
/// instances can live side by side in one process.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Base directory for all entries, created recursively if absent
    pub root_path: PathBuf,
    /// Per-value size ceiling in bytes, zero selects the default
    #[serde(default)]
    pub max_bytes: usize,
}

impl Config {
    /// Creates a Config rooted at `root_path` with the default size ceiling.
    pub fn new(root_path: impl Into<PathBuf>) -> Self {
        Self {
            root_path: root_path.into(),
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }

    /// Overrides the per-value size ceiling.
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_ROOT_PATH` - Base directory (default: empty, rejected at construction)
    /// - `CACHE_MAX_BYTES` - Per-value ceiling in bytes (default: 10 MiB)
    pub fn from_env() -> Self {
        Self {
            root_path: env::var_os("CACHE_ROOT_PATH")
                .map(PathBuf::from)
                .unwrap_or_default(),
            max_bytes: env::var("CACHE_MAX_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_BYTES),
        }
    }

    /// Returns the root directory.
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Returns the size ceiling actually enforced.
    pub fn effective_max_bytes(&self) -> usize {
        if self.max_bytes == 0 {
            DEFAULT_MAX_BYTES
        } else {
            self.max_bytes
        }
    }
}
