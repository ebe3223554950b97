//! Cache Store Module
//!
//! Main cache engine: maps keys to entry directories, serializes writers with
//! the per-key lock and evicts expired entries when they are touched.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cache::lock::KeyLock;
use crate::cache::paths::{entry_dir, payload_path};
use crate::cache::stats::StatsRecorder;
use crate::cache::{expiry, writer, CacheStats};
use crate::config::Config;
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Disk-backed key/value cache rooted at one directory.
///
/// Writes and removals hold the key's cross-process lock for their whole
/// duration. Reads take no lock and observe either the old payload, the new
/// payload, or a miss.
#[derive(Debug)]
pub struct FsCache {
    /// Base directory for all entries
    root_path: PathBuf,
    /// Per-value size ceiling in bytes
    max_bytes: usize,
    /// In-process counters
    stats: StatsRecorder,
}

impl FsCache {
    // == Constructor ==
    /// Creates a cache from `config`, creating the root directory if needed.
    pub fn new(config: Config) -> Result<Self> {
        if config.root_path.as_os_str().is_empty() {
            return Err(CacheError::RootPathEmpty);
        }
        fs::create_dir_all(&config.root_path)?;

        let max_bytes = config.effective_max_bytes();
        info!(root = %config.root_path.display(), max_bytes, "disk cache initialized");

        Ok(Self {
            root_path: config.root_path,
            max_bytes,
            stats: StatsRecorder::default(),
        })
    }

    /// Returns the root directory.
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Returns the enforced per-value size ceiling.
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Returns the entry directory `key` maps to. No I/O is performed.
    pub fn entry_path(&self, key: &str) -> Result<PathBuf> {
        entry_dir(&self.root_path, key)
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any previous value and TTL.
    ///
    /// A zero `ttl` stores the value without expiry and clears an earlier TTL.
    /// The payload is committed before the expiry marker, so a failure while
    /// updating the marker leaves the new payload with the old expiry.
    pub fn set(&self, key: &str, value: impl AsRef<[u8]>, ttl: Duration) -> Result<()> {
        let value = value.as_ref();
        self.validate_size(value.len())?;
        let dir = self.entry_path(key)?;

        if let Some(parent) = dir.parent() {
            fs::create_dir_all(parent)?;
        }

        let _lock = KeyLock::acquire(&dir)?;
        writer::write_payload(&dir, value)?;
        writer::set_ttl(&dir, ttl)?;

        self.stats.record_write();
        debug!(key, bytes = value.len(), ttl_ms = ttl.as_millis() as u64, "set cache entry");
        Ok(())
    }

    // == Get ==
    /// Returns the live value for `key`, or None on a miss.
    ///
    /// A payload removed between the existence check and the read counts as
    /// a miss, not an error.
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let Some(dir) = self.live_entry(key)? else {
            self.stats.record_miss();
            return Ok(None);
        };

        match fs::read(payload_path(&dir)) {
            Ok(bytes) => {
                self.stats.record_hit();
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.stats.record_miss();
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    // == Exists ==
    /// Returns true if `key` holds a live value.
    ///
    /// Expired entries are removed as a side effect. Fails with
    /// [`CacheError::PathIsDir`] if the payload location is a directory.
    pub fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.live_entry(key)?.is_some())
    }

    // == Time To Live ==
    /// Returns the remaining lifetime of `key`.
    ///
    /// None means the key is missing or never expires.
    pub fn ttl(&self, key: &str) -> Result<Option<Duration>> {
        match self.live_entry(key)? {
            Some(dir) => Ok(expiry::ttl_remaining(&dir)?),
            None => Ok(None),
        }
    }

    // == Remove ==
    /// Removes `key` and everything stored beneath its entry directory.
    ///
    /// Removing an absent key succeeds.
    pub fn remove(&self, key: &str) -> Result<()> {
        let dir = self.entry_path(key)?;

        match fs::symlink_metadata(&dir) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        }

        let _lock = match KeyLock::acquire(&dir) {
            Ok(lock) => lock,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        remove_entry_dir(&dir)?;

        self.stats.record_removal();
        debug!(key, "removed cache entry");
        Ok(())
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    /// Resolves `key` to its entry directory if it holds a live payload.
    fn live_entry(&self, key: &str) -> Result<Option<PathBuf>> {
        let dir = self.entry_path(key)?;
        let payload = payload_path(&dir);

        match fs::metadata(&payload) {
            Ok(meta) if meta.is_dir() => return Err(CacheError::PathIsDir(payload)),
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        }

        if expiry::is_expired(&dir)? {
            self.evict_expired(key, &dir);
            return Ok(None);
        }

        Ok(Some(dir))
    }

    /// Removes an entry found expired by a reader. Failures are only logged.
    fn evict_expired(&self, key: &str, dir: &Path) {
        match remove_if_expired(dir) {
            Ok(true) => {
                self.stats.record_expiration();
                debug!(key, "evicted expired cache entry");
            }
            Ok(false) => {}
            Err(e) => warn!(key, error = %e, "failed to evict expired cache entry"),
        }
    }

    fn validate_size(&self, size: usize) -> Result<()> {
        if size > self.max_bytes {
            return Err(CacheError::ValueTooLarge {
                size,
                max: self.max_bytes,
            });
        }
        Ok(())
    }
}

/// Deletes `dir` under its lock if it is still expired once the lock is held.
///
/// A writer may have refreshed the entry after the reader's check; in that
/// case nothing is removed.
fn remove_if_expired(dir: &Path) -> io::Result<bool> {
    let _lock = match KeyLock::acquire(dir) {
        Ok(lock) => lock,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };

    if !expiry::is_expired(dir)? {
        return Ok(false);
    }
    remove_entry_dir(dir)?;
    Ok(true)
}

fn remove_entry_dir(dir: &Path) -> io::Result<()> {
    match fs::remove_dir_all(dir) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        result => result,
    }
}
