//! Mini FS Cache - A disk-backed key/value cache
//!
//! Stores opaque byte payloads under hierarchical `::`-separated keys with
//! per-entry TTL expiry. Writes are atomic and crash-safe, and writers on the
//! same key are serialized across processes by advisory file locks.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{CacheStats, FsCache};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::AsyncFsCache;
