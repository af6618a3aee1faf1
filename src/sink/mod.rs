//! Response sinks.
//!
//! The sink contract is defined once, with two implementations selected
//! explicitly at construction time — there is no runtime capability
//! probing:
//!
//! - [`BufferSink`] — a plain in-memory sink. Stands in for a client
//!   connection in tests, and is the simplest [`ResponseSink`] a host
//!   adapter can wrap around its own connection type.
//!
//! - [`CaptureSink`] — buffer-then-replay recorder used on the miss path.
//!   The entire response is accumulated before anything reaches the store
//!   or the client; there is no streaming pass-through.

mod capture;

pub use capture::{Capture, CaptureSink};

use async_trait::async_trait;
use bytes::BytesMut;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};

use crate::Result;

/// Abstraction for writing an HTTP response toward a client.
///
/// Host adapters implement this over their real connection type; the
/// middleware only ever talks to a sink through this trait.
#[async_trait]
pub trait ResponseSink: Send {
    /// Set the response status.
    fn set_status(&mut self, status: StatusCode);

    /// Append a header value. Appending the same name twice produces a
    /// multi-valued header.
    fn append_header(&mut self, name: HeaderName, value: HeaderValue);

    /// Write a chunk of body bytes.
    async fn write(&mut self, chunk: &[u8]) -> Result<()>;
}

/// In-memory pass-through sink.
///
/// Accumulates everything written to it and exposes the result through
/// accessors. No defaulting or sniffing logic — what is written is what
/// is observed.
#[derive(Debug, Default)]
pub struct BufferSink {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: BytesMut,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The status written so far, if any.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

#[async_trait]
impl ResponseSink for BufferSink {
    fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }

    fn append_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.append(name, value);
    }

    async fn write(&mut self, chunk: &[u8]) -> Result<()> {
        self.body.extend_from_slice(chunk);
        Ok(())
    }
}
