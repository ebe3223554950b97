//! Durable Writer Module
//!
//! Atomic payload commits and TTL marker maintenance.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use chrono::{TimeDelta, Utc};
use tempfile::Builder;
use tracing::{debug, warn};

use crate::cache::expiry::is_symlink;
use crate::cache::paths::payload_path;
use crate::cache::{PAYLOAD_FILE_NAME, PAYLOAD_TEMP_PREFIX, TTL_TEMP_PREFIX};

// == Write Payload ==
/// Atomically replaces the payload of `entry_dir` with `bytes`.
///
/// The bytes go to a fresh `cache-tmp-*` file in the same directory, are
/// synced, then renamed over `cache`. Any failure before the rename removes
/// the temporary file and leaves the previous payload in place.
pub fn write_payload(entry_dir: &Path, bytes: &[u8]) -> io::Result<()> {
    fs::create_dir_all(entry_dir)?;

    let mut tmp = Builder::new()
        .prefix(PAYLOAD_TEMP_PREFIX)
        .tempfile_in(entry_dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    let target = payload_path(entry_dir);
    tmp.persist(&target).map_err(|e| e.error)?;
    sync_dir(entry_dir);

    debug!(path = %target.display(), bytes = bytes.len(), "committed payload");
    Ok(())
}

// == Set TTL ==
/// Replaces the expiry marker of `entry_dir`.
///
/// A zero `ttl` only clears existing markers. Otherwise a symlink to
/// `cache` is created under `ttl-temp-<nanos>` and renamed to `<nanos>`, so
/// the final name never appears half written.
pub fn set_ttl(entry_dir: &Path, ttl: Duration) -> io::Result<()> {
    remove_markers(entry_dir)?;
    if ttl.is_zero() {
        return Ok(());
    }

    let final_name = expiry_nanos_after(ttl).to_string();
    let final_path = entry_dir.join(&final_name);
    let tmp_path = entry_dir.join(format!("{TTL_TEMP_PREFIX}{final_name}"));

    symlink_payload(&tmp_path)?;
    if let Err(e) = fs::rename(&tmp_path, &final_path) {
        if let Err(cleanup) = fs::remove_file(&tmp_path) {
            warn!(path = %tmp_path.display(), error = %cleanup, "failed to remove temporary marker");
        }
        return Err(e);
    }

    debug!(
        path = %final_path.display(),
        ttl_ms = ttl.as_millis() as u64,
        "set expiry marker"
    );
    Ok(())
}

/// Removes every symlink in `entry_dir`, temporary markers included.
///
/// A missing directory has no markers. Individual removals are best effort.
pub fn remove_markers(entry_dir: &Path) -> io::Result<()> {
    let entries = match fs::read_dir(entry_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };

    for entry in entries {
        let entry = entry?;
        if !is_symlink(&entry)? {
            continue;
        }
        let path = entry.path();
        if let Err(e) = fs::remove_file(&path) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!(path = %path.display(), error = %e, "failed to remove expiry marker");
            }
        }
    }

    Ok(())
}

/// Absolute expiry in nanoseconds since the Unix epoch.
///
/// Deadlines past the representable range clamp to `i64::MAX`.
fn expiry_nanos_after(ttl: Duration) -> i64 {
    TimeDelta::from_std(ttl)
        .ok()
        .and_then(|delta| Utc::now().checked_add_signed(delta))
        .and_then(|expires_at| expires_at.timestamp_nanos_opt())
        .unwrap_or(i64::MAX)
}

#[cfg(unix)]
fn symlink_payload(link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(PAYLOAD_FILE_NAME, link)
}

#[cfg(windows)]
fn symlink_payload(link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(PAYLOAD_FILE_NAME, link)
}

/// Flushes the directory entry so the rename survives a crash.
#[cfg(unix)]
fn sync_dir(dir: &Path) {
    if let Err(e) = fs::File::open(dir).and_then(|d| d.sync_all()) {
        debug!(path = %dir.display(), error = %e, "directory sync skipped");
    }
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) {}
