//! Path Mapper Module
//!
//! Maps keys onto entry directories and the artifacts around them.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use crate::cache::key::split_key;
use crate::cache::{LOCK_SUFFIX, PAYLOAD_FILE_NAME};
use crate::error::{CacheError, Result};

/// Returns the entry directory for `key` under `root`.
///
/// Pure path arithmetic: nothing is created or inspected on disk. A segment
/// containing `/` nests further. Segments that are absolute, contain `..`,
/// or name no directory at all (`.`) are rejected so every entry directory
/// stays strictly below `root`.
pub fn entry_dir(root: &Path, key: &str) -> Result<PathBuf> {
    let mut dir = root.to_path_buf();
    for segment in split_key(key)? {
        push_segment(&mut dir, segment)?;
    }
    Ok(dir)
}

fn push_segment(dir: &mut PathBuf, segment: &str) -> Result<()> {
    let mut pushed = false;
    for component in Path::new(segment).components() {
        match component {
            Component::Normal(part) => {
                dir.push(part);
                pushed = true;
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(CacheError::KeyUnsafeSegment(segment.to_string()));
            }
        }
    }

    if !pushed {
        return Err(CacheError::KeyUnsafeSegment(segment.to_string()));
    }
    Ok(())
}

/// Returns the payload file inside an entry directory.
pub fn payload_path(entry_dir: &Path) -> PathBuf {
    entry_dir.join(PAYLOAD_FILE_NAME)
}

/// Returns the lock file for an entry directory.
///
/// The lock file is a sibling (`<dir>.lock`), so removing the entry
/// directory never deletes a handle another caller may be waiting on.
pub fn lock_path(entry_dir: &Path) -> PathBuf {
    let mut path = OsString::from(entry_dir.as_os_str());
    path.push(LOCK_SUFFIX);
    PathBuf::from(path)
}
