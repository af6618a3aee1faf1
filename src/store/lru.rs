//! Strict-LRU cache store.

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;

use super::{CacheEntry, CacheStore};
use crate::error::{CacheError, Result};
use crate::key::CacheKey;

/// [`CacheStore`] with strict least-recently-used eviction.
///
/// A `get` promotes the entry's recency; `contains` does not. All three
/// operations take one short critical section on an internal mutex, so
/// they are atomic to callers without external locking.
///
/// Eviction is deterministic: adding a new key to a full store evicts
/// exactly the least-recently-used entry.
pub struct LruStore {
    entries: Mutex<LruCache<CacheKey, CacheEntry>>,
}

impl std::fmt::Debug for LruStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LruStore").finish_non_exhaustive()
    }
}

impl LruStore {
    /// Create a store holding at most `capacity` entries.
    ///
    /// Fails with [`CacheError::Configuration`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or_else(|| {
            CacheError::Configuration("cache capacity must be positive".into())
        })?;
        Ok(Self {
            entries: Mutex::new(LruCache::new(capacity)),
        })
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheStore for LruStore {
    fn add(&self, key: CacheKey, entry: CacheEntry) -> bool {
        match self.entries.lock().push(key, entry) {
            // push returns the displaced pair: the same key means a
            // replacement, a different key means a capacity eviction.
            Some((displaced, _)) => displaced != key,
            None => false,
        }
    }

    fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.entries.lock().get(key).cloned()
    }

    fn contains(&self, key: &CacheKey) -> bool {
        self.entries.lock().contains(key)
    }
}
