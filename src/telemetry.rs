//! Telemetry metric name constants.
//!
//! Centralised metric names for mimir operations. Consumers install their
//! own `metrics` recorder (e.g. prometheus, statsd); without a recorder
//! installed, all metric calls are no-ops.
//!
//! All metrics are prefixed with `mimir_` and counters end in `_total`.

/// Requests served from the cache without invoking downstream.
pub const CACHE_HITS_TOTAL: &str = "mimir_cache_hits_total";

/// Requests that invoked downstream because no fresh entry existed.
///
/// Labels: `reason` ("miss" | "stale").
pub const CACHE_MISSES_TOTAL: &str = "mimir_cache_misses_total";

/// Captured responses written to the store.
pub const CACHE_STORES_TOTAL: &str = "mimir_cache_stores_total";

/// Store writes that evicted another entry to make room.
pub const CACHE_EVICTIONS_TOTAL: &str = "mimir_cache_evictions_total";

/// Requests that bypassed the cache because of their HTTP verb.
///
/// Labels: `method`.
pub const CACHE_BYPASSES_TOTAL: &str = "mimir_cache_bypasses_total";
