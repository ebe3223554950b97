//! Key Codec Module
//!
//! Validates hierarchical keys and splits them into path segments.

use crate::cache::KEY_SEPARATOR;
use crate::error::{CacheError, Result};

// == Validate ==
/// Checks that `key` is well formed.
///
/// A key without the separator is always valid as long as it is non-empty,
/// whatever other punctuation it contains. When the separator is present,
/// every segment between separators must be non-empty.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::KeyEmpty);
    }

    if !key.contains(KEY_SEPARATOR) {
        return Ok(());
    }

    if key.split(KEY_SEPARATOR).any(str::is_empty) {
        return Err(CacheError::KeyEmptySegment(key.to_string()));
    }

    Ok(())
}

// == Split ==
/// Splits a validated key into its path segments.
pub fn split_key(key: &str) -> Result<Vec<&str>> {
    validate_key(key)?;
    Ok(key.split(KEY_SEPARATOR).collect())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_empty_key() {
        assert!(matches!(validate_key(""), Err(CacheError::KeyEmpty)));
        assert!(matches!(split_key(""), Err(CacheError::KeyEmpty)));
    }

    #[test]
    fn test_validate_rejects_empty_segments() {
        for key in ["::x", "x::", "a::::b", "::", "a::b::"] {
            assert!(
                matches!(validate_key(key), Err(CacheError::KeyEmptySegment(ref k)) if k == key),
                "key {key:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_accepts_other_punctuation() {
        for key in ["a", "a:b", "user@example.com", "a b", "x.y-z", ":"] {
            assert!(validate_key(key).is_ok(), "key {key:?} should be accepted");
        }
    }

    #[test]
    fn test_triple_colon_keeps_trailing_colon_in_segment() {
        // "a:::b" splits as "a" + ":b"
        assert_eq!(split_key("a:::b").unwrap(), vec!["a", ":b"]);
    }

    #[test]
    fn test_split_segments() {
        assert_eq!(split_key("a").unwrap(), vec!["a"]);
        assert_eq!(split_key("a::b").unwrap(), vec!["a", "b"]);
        assert_eq!(split_key("a::b::c::2").unwrap(), vec!["a", "b", "c", "2"]);
    }

    #[test]
    fn test_split_single_segment_is_unchanged() {
        let key = "users:42";
        assert_eq!(split_key(key).unwrap(), vec![key]);
    }
}
