//! Mimir error types

/// Mimir error types
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    // Construction errors
    #[error("configuration error: {0}")]
    Configuration(String),

    // Per-request errors
    #[error("cache key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("client write failed: {0}")]
    Write(String),

    /// Downstream handler failure. Propagated to the caller without
    /// storing the partial capture.
    #[error("handler error: {0}")]
    Handler(String),
}

/// Result type alias for Mimir operations
pub type Result<T> = std::result::Result<T, CacheError>;
