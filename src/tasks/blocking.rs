//! Blocking Offload
//!
//! Async handle over a shared [`FsCache`].

use std::sync::Arc;
use std::time::Duration;

use tokio::task;

use crate::cache::{CacheStats, FsCache};
use crate::config::Config;
use crate::error::Result;

/// Cloneable async handle to a disk cache.
///
/// Clones share one [`FsCache`] and its counters. Dropping the returned
/// future does not cancel the operation already running on the pool.
#[derive(Debug, Clone)]
pub struct AsyncFsCache {
    /// Shared blocking cache
    inner: Arc<FsCache>,
}

impl AsyncFsCache {
    /// Wraps an existing cache.
    pub fn new(cache: FsCache) -> Self {
        Self {
            inner: Arc::new(cache),
        }
    }

    /// Builds the cache from `config` on the blocking pool.
    pub async fn from_config(config: Config) -> Result<Self> {
        let cache = task::spawn_blocking(move || FsCache::new(config)).await??;
        Ok(Self::new(cache))
    }

    /// Returns the wrapped blocking cache.
    pub fn blocking(&self) -> &FsCache {
        &self.inner
    }

    /// See [`FsCache::set`].
    pub async fn set(&self, key: impl Into<String>, value: Vec<u8>, ttl: Duration) -> Result<()> {
        let key = key.into();
        self.run(move |cache| cache.set(&key, value, ttl)).await
    }

    /// See [`FsCache::get`].
    pub async fn get(&self, key: impl Into<String>) -> Result<Option<Vec<u8>>> {
        let key = key.into();
        self.run(move |cache| cache.get(&key)).await
    }

    /// See [`FsCache::exists`].
    pub async fn exists(&self, key: impl Into<String>) -> Result<bool> {
        let key = key.into();
        self.run(move |cache| cache.exists(&key)).await
    }

    /// See [`FsCache::ttl`].
    pub async fn ttl(&self, key: impl Into<String>) -> Result<Option<Duration>> {
        let key = key.into();
        self.run(move |cache| cache.ttl(&key)).await
    }

    /// See [`FsCache::remove`].
    pub async fn remove(&self, key: impl Into<String>) -> Result<()> {
        let key = key.into();
        self.run(move |cache| cache.remove(&key)).await
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.inner.stats()
    }

    async fn run<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&FsCache) -> Result<T> + Send + 'static,
    {
        let cache = Arc::clone(&self.inner);
        task::spawn_blocking(move || op(cache.as_ref())).await?
    }
}
