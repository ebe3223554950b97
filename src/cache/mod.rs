//! Cache Module
//!
//! Provides a disk-backed cache with TTL expiry and cross-process locking.
//!
//! # On-disk layout
//! - `root/seg1/.../segN/` - entry directory for key `seg1::...::segN`
//! - `<entry>/cache` - payload file
//! - `<entry>/<nanos>` - expiry marker, a symlink to `cache`
//! - `<entry>.lock` - advisory lock file, sibling of the entry directory

mod codec;
mod expiry;
mod key;
mod lock;
mod paths;
mod stats;
mod store;
mod writer;


// Re-export public types
pub use expiry::{current_expiry, is_expired};
pub use key::{split_key, validate_key};
pub use lock::KeyLock;
pub use paths::{entry_dir, lock_path, payload_path};
pub use stats::CacheStats;
pub use store::FsCache;

// == Public Constants ==
/// Separator between key segments
pub const KEY_SEPARATOR: &str = "::";

/// Name of the payload file inside an entry directory
pub const PAYLOAD_FILE_NAME: &str = "cache";

/// Prefix of in-flight payload files
pub const PAYLOAD_TEMP_PREFIX: &str = "cache-tmp-";

/// Suffix appended to an entry directory to name its lock file
pub const LOCK_SUFFIX: &str = ".lock";

/// Prefix of in-flight expiry markers
pub const TTL_TEMP_PREFIX: &str = "ttl-temp-";

/// Default per-value size ceiling
pub const DEFAULT_MAX_BYTES: usize = 10 * 1024 * 1024; // 10 MiB
