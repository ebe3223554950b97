//! Typed Value Module
//!
//! JSON encoding on top of the byte API for callers storing structured values.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::FsCache;
use crate::error::Result;

impl FsCache {
    /// Encodes `value` as JSON and stores it under `key`.
    ///
    /// The size ceiling applies to the encoded bytes.
    pub fn set_json<T>(&self, key: &str, value: &T, ttl: Duration) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let bytes = serde_json::to_vec(value)?;
        self.set(key, bytes, ttl)
    }

    /// Reads and decodes a JSON value stored under `key`.
    ///
    /// A payload that does not decode into `T` is a
    /// [`crate::CacheError::Codec`] error, not a miss.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}
