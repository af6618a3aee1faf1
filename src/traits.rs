//! Core Handler trait

use async_trait::async_trait;

use crate::request::Request;
use crate::sink::ResponseSink;
use crate::Result;

/// A request handler — either the downstream continuation of a middleware
/// chain or a complete handler produced by
/// [`HttpCache::wrap`](crate::HttpCache::wrap).
///
/// Handlers receive the request and a sink for the response. Any internal
/// suspension (network, storage) is opaque to callers; the middleware
/// awaits the handler fully before proceeding and imposes no timeout or
/// cancellation of its own.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Handle one request, writing the response to `sink`.
    async fn handle(&self, request: &Request, sink: &mut dyn ResponseSink) -> Result<()>;
}
