//! Cache key derivation.
//!
//! A [`CacheKey`] is a deterministic 128-bit digest of the canonical
//! request target (scheme + host + path + query, taken verbatim — no case
//! or trailing-slash normalization). The same target string always yields
//! the same key bytes, across process instances: the digest is an unkeyed
//! blake3 hash truncated to 16 bytes, so there is no per-process seed.
//!
//! The key space is wide enough that distinct targets are assumed
//! non-colliding; no collision handling exists anywhere in the crate.
//!
//! The HTTP method is deliberately not part of the key: a GET and a HEAD
//! to the same URL alias to the same cache slot. This is a documented
//! limitation, not special-cased.

use std::fmt;

use crate::error::{CacheError, Result};

/// Width of a cache key in bytes.
pub const KEY_LEN: usize = 16;

/// Fixed-width key identifying a cacheable request target.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey([u8; KEY_LEN]);

impl CacheKey {
    /// Derive the key for a request target.
    ///
    /// Pure and deterministic: identical target strings produce identical
    /// key bytes, repeatably and across processes. Fails only when the
    /// target is empty — an empty target cannot identify a resource, and
    /// caching under it would corrupt the slot for every other malformed
    /// request.
    pub fn derive(target: &str) -> Result<Self> {
        if target.is_empty() {
            return Err(CacheError::KeyDerivation("empty request target".into()));
        }

        let digest = blake3::hash(target.as_bytes());
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&digest.as_bytes()[..KEY_LEN]);
        Ok(Self(key))
    }

    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CacheKey(")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}
