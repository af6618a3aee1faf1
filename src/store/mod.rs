//! Cache storage.
//!
//! The orchestrator depends on exactly three operations — add, get,
//! contains — expressed by the [`CacheStore`] trait. Eviction policy is
//! internal to each implementation and opaque to callers. Two
//! implementations are provided, selected at construction via
//! [`CacheOptions::store`](crate::CacheOptions::store):
//!
//! - [`LruStore`] — strict least-recently-used eviction behind a mutex.
//!   Deterministic: inserting into a full store evicts exactly one entry.
//!   The default.
//!
//! - [`MokaStore`] — moka's concurrent cache. Lock-free reads under high
//!   contention, at the cost of an approximate admission/eviction policy.
//!
//! Every operation is atomic under concurrent invocation; callers never
//! lock externally. A store is owned by one middleware instance and its
//! state disappears with it — nothing is persisted.

mod lru;
mod moka;

pub use self::lru::LruStore;
pub use self::moka::MokaStore;

use std::time::Duration;

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use tokio::time::Instant;

use crate::key::CacheKey;

/// Stored snapshot of a prior response.
///
/// Immutable once constructed; a key's entry is replaced wholesale on the
/// next miss, never mutated in place. `body` is reference-counted, so
/// cloning an entry out of a store does not copy the payload.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub created_at: Instant,
}

impl CacheEntry {
    /// Snapshot a captured response, stamped with the current time.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
            created_at: Instant::now(),
        }
    }

    /// Whether the entry is still within its freshness window.
    ///
    /// Fresh iff `now - created_at <= max_age`; the boundary instant is
    /// still fresh. Staleness is evaluated lazily at read time — stale
    /// entries linger until overwritten or evicted by capacity pressure.
    pub fn is_fresh(&self, max_age: Duration) -> bool {
        self.created_at.elapsed() <= max_age
    }

    /// Time elapsed since the entry was stored.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }
}

/// Bounded key→entry container, safe under concurrent access.
///
/// Implementations serialize (or lock-freely coordinate) internally so
/// each operation appears atomic to callers.
pub trait CacheStore: Send + Sync {
    /// Insert or replace the entry for `key`. Returns `true` when the
    /// insert evicted a different key's entry to make room.
    fn add(&self, key: CacheKey, entry: CacheEntry) -> bool;

    /// Look up the entry for `key`.
    fn get(&self, key: &CacheKey) -> Option<CacheEntry>;

    /// Whether an entry exists for `key`, without touching recency.
    fn contains(&self, key: &CacheKey) -> bool;
}
