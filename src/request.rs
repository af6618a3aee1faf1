//! Inbound request view.

use http::Method;

/// The slice of an inbound request the middleware cares about: the HTTP
/// method (for the verb gate) and the canonical target string (for key
/// derivation).
///
/// The target is whatever the host server considers the full request
/// URL — scheme, host, path, and query — and is hashed verbatim. Two
/// targets that differ only in case or a trailing slash are distinct
/// cache slots.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    target: String,
}

impl Request {
    /// Build a request view from a method and target URL string.
    pub fn new(method: Method, target: impl Into<String>) -> Self {
        Self {
            method,
            target: target.into(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}
