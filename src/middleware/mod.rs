//! The caching middleware itself.
//!
//! [`HttpCache`] orchestrates one request: verb gate → key derivation →
//! lookup and freshness check → replay, or capture-then-store-then-flush.
//! It composes into a handler chain either by wrapping an existing
//! [`Handler`] ([`HttpCache::wrap`]) or by being called with an explicit
//! continuation ([`HttpCache::intercept`]).
//!
//! Side effects per request are exactly one store write (on a miss or
//! stale entry that produced a body) and exactly one client write, in
//! that order — a client write failure never leaves a half-written cache
//! entry.
//!
//! Two concurrent misses on the same key each invoke downstream and each
//! write the store; last write wins. Single-flight de-duplication is an
//! open extension, not implemented here.

mod options;

pub use options::{CacheOptions, DEFAULT_CAPACITY, DEFAULT_HEADER_SEPARATOR, DEFAULT_MAX_AGE};

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use tracing::debug;

use crate::error::{CacheError, Result};
use crate::key::CacheKey;
use crate::request::Request;
use crate::sink::{CaptureSink, ResponseSink};
use crate::store::{CacheEntry, CacheStore, LruStore};
use crate::telemetry;
use crate::traits::Handler;

fn is_cacheable_verb(method: &Method) -> bool {
    *method == Method::GET || *method == Method::HEAD || *method == Method::OPTIONS
}

/// HTTP response-caching middleware.
///
/// Owns its [`CacheStore`] exclusively; all configuration is immutable
/// after construction, so a `HttpCache` can be shared across request
/// tasks behind an `Arc` with no external synchronization.
///
/// Cache keys are derived from the request target only — method-agnostic,
/// so a GET and a HEAD to the same URL share a slot (see
/// [`key`](crate::key) module docs).
pub struct HttpCache {
    store: Arc<dyn CacheStore>,
    allowed_verbs: HashSet<Method>,
    max_age: Duration,
    header_separator: String,
}

impl std::fmt::Debug for HttpCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCache")
            .field("allowed_verbs", &self.allowed_verbs)
            .field("max_age", &self.max_age)
            .field("header_separator", &self.header_separator)
            .finish_non_exhaustive()
    }
}

impl HttpCache {
    /// Build a middleware instance from `options`.
    ///
    /// Fails fast with [`CacheError::Configuration`] — never returning a
    /// partially initialized instance — when the capacity is zero, a verb
    /// outside {GET, HEAD, OPTIONS} is allowed, or the header separator
    /// is not a valid header byte sequence.
    pub fn new(options: CacheOptions) -> Result<Self> {
        if options.capacity == 0 {
            return Err(CacheError::Configuration(
                "cache capacity must be positive".into(),
            ));
        }

        let mut allowed_verbs = HashSet::new();
        for verb in &options.allowed_verbs {
            if !is_cacheable_verb(verb) {
                return Err(CacheError::Configuration(format!(
                    "verb {verb} is not cacheable (supported: GET, HEAD, OPTIONS)"
                )));
            }
            allowed_verbs.insert(verb.clone());
        }

        if HeaderValue::from_str(&options.header_separator).is_err() {
            return Err(CacheError::Configuration(format!(
                "header separator {:?} is not valid inside a header value",
                options.header_separator
            )));
        }

        let store: Arc<dyn CacheStore> = match options.store {
            Some(store) => store,
            None => Arc::new(LruStore::new(options.capacity)?),
        };

        Ok(Self {
            store,
            allowed_verbs,
            max_age: options.max_age,
            header_separator: options.header_separator,
        })
    }

    /// Wrap an existing handler, returning an equivalent cache-augmented
    /// handler.
    pub fn wrap<H: Handler>(self, inner: H) -> CachedHandler<H> {
        CachedHandler { cache: self, inner }
    }

    /// Run one request through the cache, with `next` as the explicit
    /// continuation.
    ///
    /// For verbs outside the allowed set the continuation runs directly
    /// against `sink`; the store is neither read nor written.
    pub async fn intercept(
        &self,
        request: &Request,
        sink: &mut dyn ResponseSink,
        next: &dyn Handler,
    ) -> Result<()> {
        if !self.allowed_verbs.contains(request.method()) {
            metrics::counter!(
                telemetry::CACHE_BYPASSES_TOTAL,
                "method" => request.method().to_string()
            )
            .increment(1);
            return next.handle(request, sink).await;
        }

        // A derivation fault aborts this request rather than silently
        // bypassing the cache: caching under a corrupted key would poison
        // a slot for unrelated requests.
        let key = CacheKey::derive(request.target())?;

        let mut stale = false;
        if let Some(entry) = self.store.get(&key) {
            if entry.is_fresh(self.max_age) {
                debug!(url = request.target(), "cache hit");
                metrics::counter!(telemetry::CACHE_HITS_TOTAL).increment(1);
                return self.flush(Some(entry.status), &entry.headers, &entry.body, sink).await;
            }
            debug!(url = request.target(), age = ?entry.age(), "cache entry stale");
            stale = true;
        }

        metrics::counter!(
            telemetry::CACHE_MISSES_TOTAL,
            "reason" => if stale { "stale" } else { "miss" }
        )
        .increment(1);

        let mut capture = CaptureSink::new();
        next.handle(request, &mut capture).await?;
        let captured = capture.finalize();

        match captured.status {
            Some(status) => {
                let entry = CacheEntry::new(status, captured.headers, captured.body);
                // Store before flushing: a client write failure must not
                // leave a half-written entry, and the entry itself is
                // already complete.
                if self.store.add(key, entry.clone()) {
                    metrics::counter!(telemetry::CACHE_EVICTIONS_TOTAL).increment(1);
                }
                metrics::counter!(telemetry::CACHE_STORES_TOTAL).increment(1);
                debug!(url = request.target(), bytes = entry.body.len(), "cached response");
                self.flush(Some(entry.status), &entry.headers, &entry.body, sink)
                    .await
            }
            None => {
                // Downstream produced no status and no body. Nothing to
                // cache, but whatever exists (headers, at most) still
                // reaches the client.
                self.flush(None, &captured.headers, &captured.body, sink)
                    .await
            }
        }
    }

    /// Write a response to the real client sink.
    ///
    /// Multi-valued headers are joined into a single value with the
    /// configured separator; the store keeps the original multimap.
    async fn flush(
        &self,
        status: Option<StatusCode>,
        headers: &HeaderMap,
        body: &[u8],
        sink: &mut dyn ResponseSink,
    ) -> Result<()> {
        for name in headers.keys() {
            let mut joined = Vec::new();
            for (i, value) in headers.get_all(name).iter().enumerate() {
                if i > 0 {
                    joined.extend_from_slice(self.header_separator.as_bytes());
                }
                joined.extend_from_slice(value.as_bytes());
            }
            let value = HeaderValue::from_bytes(&joined).map_err(|err| {
                CacheError::Write(format!("joined header {name} is not writable: {err}"))
            })?;
            sink.append_header(name.clone(), value);
        }

        if let Some(status) = status {
            sink.set_status(status);
            sink.write(body).await?;
        }
        Ok(())
    }
}

/// A [`Handler`] produced by [`HttpCache::wrap`]: the wrapped handler
/// with caching layered in front of it.
pub struct CachedHandler<H> {
    cache: HttpCache,
    inner: H,
}

#[async_trait]
impl<H: Handler> Handler for CachedHandler<H> {
    async fn handle(&self, request: &Request, sink: &mut dyn ResponseSink) -> Result<()> {
        self.cache.intercept(request, sink, &self.inner).await
    }
}
