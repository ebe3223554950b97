//! Error types for the disk cache
//!
//! Provides unified error handling using thiserror.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the disk cache.
///
/// Validation variants are returned before the filesystem is touched.
/// Filesystem failures are carried through unchanged in [`CacheError::Io`].
#[derive(Error, Debug)]
pub enum CacheError {
    /// Configured root path is empty
    #[error("cache root path cannot be empty")]
    RootPathEmpty,

    /// Key is the empty string
    #[error("cache key cannot be empty")]
    KeyEmpty,

    /// Key has a leading, trailing or doubled separator
    #[error("cache key contains empty segment: {0:?}")]
    KeyEmptySegment(String),

    /// Key segment would resolve outside its parent directory
    #[error("cache key segment does not map to a directory: {0:?}")]
    KeyUnsafeSegment(String),

    /// Payload exceeds the configured ceiling
    #[error("cache value exceeds max bytes: got {size} bytes, max {max} bytes")]
    ValueTooLarge { size: usize, max: usize },

    /// Payload location is a directory
    #[error("cache path is a directory: {}", .0.display())]
    PathIsDir(PathBuf),

    /// Underlying filesystem or lock failure
    #[error("cache I/O error: {0}")]
    Io(#[from] io::Error),

    /// Typed value could not be encoded or decoded
    #[error("cache value codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// Blocking task panicked or was cancelled
    #[error("cache task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl CacheError {
    /// Returns true for errors caused by a malformed key.
    pub fn is_invalid_key(&self) -> bool {
        matches!(
            self,
            CacheError::KeyEmpty | CacheError::KeyEmptySegment(_) | CacheError::KeyUnsafeSegment(_)
        )
    }
}

// == Result Type Alias ==
/// Convenience Result type for the disk cache.
pub type Result<T> = std::result::Result<T, CacheError>;
