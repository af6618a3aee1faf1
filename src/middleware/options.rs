//! Middleware configuration.

use std::sync::Arc;
use std::time::Duration;

use http::Method;

use crate::store::CacheStore;

/// Default freshness window: 60 seconds.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_millis(60_000);

/// Default store capacity.
pub const DEFAULT_CAPACITY: usize = 1_000;

/// Default separator used when joining multi-valued headers for the
/// client.
pub const DEFAULT_HEADER_SEPARATOR: &str = ";";

/// Configuration for [`HttpCache`](crate::HttpCache).
///
/// ```rust
/// # use mimir::CacheOptions;
/// # use std::time::Duration;
/// # use http::Method;
/// let options = CacheOptions::new()
///     .allowed_verbs([Method::GET])
///     .max_age(Duration::from_secs(300))
///     .capacity(10_000);
/// ```
#[derive(Clone)]
pub struct CacheOptions {
    /// Verbs eligible for caching. Must be a subset of
    /// {GET, HEAD, OPTIONS}; anything else fails construction.
    pub allowed_verbs: Vec<Method>,
    /// Freshness window for stored entries.
    pub max_age: Duration,
    /// Maximum number of stored entries. Must be positive.
    pub capacity: usize,
    /// Separator for joining multi-valued headers on the client write.
    pub header_separator: String,
    /// Optional pluggable store. When absent, an
    /// [`LruStore`](crate::store::LruStore) of `capacity` entries is
    /// built.
    pub store: Option<Arc<dyn CacheStore>>,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            allowed_verbs: vec![Method::GET, Method::HEAD, Method::OPTIONS],
            max_age: DEFAULT_MAX_AGE,
            capacity: DEFAULT_CAPACITY,
            header_separator: DEFAULT_HEADER_SEPARATOR.to_string(),
            store: None,
        }
    }
}

impl CacheOptions {
    /// Create options with the defaults: all three cacheable verbs, a
    /// 60 second freshness window, 1000 entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the set of cacheable verbs.
    pub fn allowed_verbs(mut self, verbs: impl IntoIterator<Item = Method>) -> Self {
        self.allowed_verbs = verbs.into_iter().collect();
        self
    }

    /// Set the freshness window.
    pub fn max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Set the store capacity.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the multi-value header join separator.
    pub fn header_separator(mut self, separator: impl Into<String>) -> Self {
        self.header_separator = separator.into();
        self
    }

    /// Inject a pluggable store instead of the default LRU.
    ///
    /// The store is owned by the middleware instance built from these
    /// options; its lifetime is scoped to that instance, never global.
    pub fn store(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.store = Some(store);
        self
    }
}
