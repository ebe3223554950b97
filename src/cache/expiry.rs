//! Expiry Evaluator Module
//!
//! Reads the expiry marker of an entry directory and decides whether the
//! payload is still live.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};

use crate::cache::TTL_TEMP_PREFIX;

// == Current Expiry ==
/// Returns the expiry instant recorded in `entry_dir`, if any.
///
/// Only symlinks count. Temporary markers and names that are not an integer
/// are skipped. A missing directory has no expiry. When several final
/// markers exist, the first one in directory order wins; that order is not
/// specified by the filesystem.
pub fn current_expiry(entry_dir: &Path) -> io::Result<Option<DateTime<Utc>>> {
    let entries = match fs::read_dir(entry_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };

    for entry in entries {
        let entry = entry?;
        if !is_symlink(&entry)? {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.starts_with(TTL_TEMP_PREFIX) {
            continue;
        }
        if let Ok(nanos) = name.parse::<i64>() {
            return Ok(Some(Utc.timestamp_nanos(nanos)));
        }
    }

    Ok(None)
}

// == Is Expired ==
/// Returns true once the current time is strictly after the recorded expiry.
///
/// Entries without a marker never expire.
pub fn is_expired(entry_dir: &Path) -> io::Result<bool> {
    Ok(current_expiry(entry_dir)?.is_some_and(|expires_at| Utc::now() > expires_at))
}

// == Time To Live ==
/// Returns the time left before expiry, or None if no expiry is set.
///
/// Returns `Some(Duration::ZERO)` once the deadline has passed.
pub fn ttl_remaining(entry_dir: &Path) -> io::Result<Option<Duration>> {
    Ok(current_expiry(entry_dir)?.map(|expires_at| {
        (expires_at - Utc::now())
            .to_std()
            .unwrap_or(Duration::ZERO)
    }))
}

/// Returns true if `entry` is a symlink.
///
/// An entry renamed or removed while the directory is being read is
/// reported as not a symlink.
pub(crate) fn is_symlink(entry: &fs::DirEntry) -> io::Result<bool> {
    match entry.file_type() {
        Ok(file_type) => Ok(file_type.is_symlink()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
