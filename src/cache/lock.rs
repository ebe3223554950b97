//! Cross-Process Lock Module
//!
//! Exclusive advisory file locks, one per entry directory.
//!
//! The lock lives on an open file handle, so the operating system drops it
//! when the handle closes, including when the holding process dies. Only
//! callers that go through [`KeyLock`] are excluded from each other.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, warn};

use crate::cache::paths::lock_path;

// == Key Lock ==
/// Exclusive lock held on `<entry_dir>.lock`.
///
/// Released when dropped, on every exit path.
#[derive(Debug)]
pub struct KeyLock {
    /// Open lock file (the lock is scoped to this handle)
    file: File,
    /// Path to the lock file
    lock_path: PathBuf,
}

impl KeyLock {
    /// Blocks until the exclusive lock for `entry_dir` is held.
    ///
    /// The lock file is created if absent. Its parent directory must already
    /// exist. There is no timeout.
    pub fn acquire(entry_dir: &Path) -> io::Result<Self> {
        let lock_path = lock_path(entry_dir);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        FileExt::lock_exclusive(&file)?;
        debug!(path = %lock_path.display(), "acquired key lock");

        Ok(Self { file, lock_path })
    }

    /// Path of the lock file backing this lock.
    pub fn path(&self) -> &Path {
        &self.lock_path
    }

    /// Releases the lock now instead of at end of scope.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for KeyLock {
    fn drop(&mut self) {
        // Closing the handle releases the lock anyway.
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!(path = %self.lock_path.display(), error = %e, "failed to unlock key lock");
        } else {
            debug!(path = %self.lock_path.display(), "released key lock");
        }
    }
}
