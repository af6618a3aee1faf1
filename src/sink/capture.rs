//! Buffer-then-replay response recorder.

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};

use super::ResponseSink;
use crate::sniff;
use crate::Result;

/// The accumulated result of a downstream invocation.
///
/// `status` is `None` when the handler neither set a status nor wrote any
/// body — the middleware skips the store in that case but still flushes
/// the (possibly header-only) response to the client.
#[derive(Debug, Clone)]
pub struct Capture {
    pub status: Option<StatusCode>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Recording [`ResponseSink`] handed to the downstream continuation on a
/// cache miss.
///
/// Mirrors standard response-writer semantics:
///
/// - The first body write defaults the status to 200 when none was set.
/// - The first body write sniffs a `Content-Type` from its leading bytes
///   when none is present; the sniffed value is set exactly once and
///   never overridden by later writes.
/// - Status and header mutations after the first body write are ignored —
///   headers are fixed once the body starts flowing.
#[derive(Debug, Default)]
pub struct CaptureSink {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: BytesMut,
    body_started: bool,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Yield the accumulated status, headers, and body.
    ///
    /// Idempotent: calling twice after the downstream handler returns
    /// produces identical captures.
    pub fn finalize(&self) -> Capture {
        Capture {
            status: self.status,
            headers: self.headers.clone(),
            body: self.body.clone().freeze(),
        }
    }
}

#[async_trait]
impl ResponseSink for CaptureSink {
    fn set_status(&mut self, status: StatusCode) {
        if !self.body_started {
            self.status = Some(status);
        }
    }

    fn append_header(&mut self, name: HeaderName, value: HeaderValue) {
        if !self.body_started {
            self.headers.append(name, value);
        }
    }

    async fn write(&mut self, chunk: &[u8]) -> Result<()> {
        if !self.body_started {
            self.body_started = true;
            if self.status.is_none() {
                self.status = Some(StatusCode::OK);
            }
            if !self.headers.contains_key(CONTENT_TYPE) {
                let mime = sniff::detect_content_type(chunk);
                self.headers
                    .insert(CONTENT_TYPE, HeaderValue::from_static(mime));
            }
        }
        self.body.extend_from_slice(chunk);
        Ok(())
    }
}
