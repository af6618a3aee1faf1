//! Mimir - HTTP response caching middleware
//!
//! This crate provides an in-memory, process-scoped response cache that
//! composes into any request/response handler chain. On a miss it runs
//! the downstream handler through a buffering capture sink, stores the
//! result, and flushes it to the client; on a fresh hit it replays the
//! stored response without invoking downstream at all.
//!
//! Freshness is a single configured window applied uniformly — this is
//! deliberately not an RFC-compliant HTTP cache (no `Vary`,
//! `Cache-Control`, ETag, or conditional-request handling).
//!
//! # Example
//!
//! ```rust,no_run
//! use mimir::{BufferSink, CacheOptions, Handler, HttpCache, Request, ResponseSink};
//!
//! struct Hello;
//!
//! #[async_trait::async_trait]
//! impl Handler for Hello {
//!     async fn handle(&self, _request: &Request, sink: &mut dyn ResponseSink) -> mimir::Result<()> {
//!         sink.write(b"hello").await
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> mimir::Result<()> {
//!     let cached = HttpCache::new(CacheOptions::default())?.wrap(Hello);
//!
//!     let request = Request::new(http::Method::GET, "https://example.com/hello");
//!     let mut sink = BufferSink::new();
//!     cached.handle(&request, &mut sink).await?;
//!
//!     // A second identical request within the freshness window replays
//!     // the stored bytes without running `Hello` again.
//!     let mut sink = BufferSink::new();
//!     cached.handle(&request, &mut sink).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod key;
pub mod middleware;
pub mod request;
pub mod sink;
pub mod sniff;
pub mod store;
pub mod telemetry;
pub mod traits;

// Re-export main types at crate root
pub use error::{CacheError, Result};
pub use key::CacheKey;
pub use middleware::{CacheOptions, CachedHandler, HttpCache};
pub use request::Request;
pub use sink::{BufferSink, Capture, CaptureSink, ResponseSink};
pub use store::{CacheEntry, CacheStore, LruStore, MokaStore};
pub use traits::Handler;
