//! Concurrent cache store backed by moka.

use std::sync::Arc;

use moka::notification::RemovalCause;
use moka::sync::Cache;
use parking_lot::Mutex;

use super::{CacheEntry, CacheStore};
use crate::error::{CacheError, Result};
use crate::key::CacheKey;

/// [`CacheStore`] backed by [`moka::sync::Cache`].
///
/// Reads are lock-free, which makes this the better choice under heavy
/// concurrent load. The trade-off is moka's TinyLFU admission policy:
/// which entry leaves a full cache (or whether the new entry is admitted
/// at all) is approximate. The eviction flag returned by
/// [`add`](CacheStore::add) is fed by moka's eviction listener and only
/// reports keys other than the one just inserted — a rejected insert is
/// not an eviction — but under concurrent `add`s a displacement may be
/// attributed to whichever call drains it first. When tests or callers
/// need deterministic eviction, use [`LruStore`](super::LruStore)
/// instead.
pub struct MokaStore {
    entries: Cache<CacheKey, CacheEntry>,
    displaced: Arc<Mutex<Vec<CacheKey>>>,
}

impl std::fmt::Debug for MokaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaStore").finish_non_exhaustive()
    }
}

impl MokaStore {
    /// Create a store holding at most `capacity` entries.
    ///
    /// Fails with [`CacheError::Configuration`] when `capacity` is zero.
    pub fn new(capacity: u64) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::Configuration(
                "cache capacity must be positive".into(),
            ));
        }

        let displaced: Arc<Mutex<Vec<CacheKey>>> = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&displaced);
        let entries = Cache::builder()
            .max_capacity(capacity)
            .eviction_listener(move |key: Arc<CacheKey>, _entry, cause| {
                // Size covers both capacity evictions and the admission
                // policy rejecting the candidate itself; the two are told
                // apart by key in add().
                if matches!(cause, RemovalCause::Size) {
                    log.lock().push(*key);
                }
            })
            .build();

        Ok(Self { entries, displaced })
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }
}

impl CacheStore for MokaStore {
    fn add(&self, key: CacheKey, entry: CacheEntry) -> bool {
        self.entries.insert(key, entry);
        self.entries.run_pending_tasks();

        self.displaced
            .lock()
            .drain(..)
            .any(|evicted| evicted != key)
    }

    fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.entries.get(key)
    }

    fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }
}
