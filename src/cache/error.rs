use thiserror::Error;

/// Errors raised by cache backends.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key rejected by the cache (empty or too long)
    #[error("Invalid cache key: {0}")]
    InvalidKey(String),

    /// Value exceeds the size a single entry may hold
    #[error("Cache value too large: {0}")]
    ValueTooLarge(String),

    /// No room for a new entry and nothing could be evicted
    #[error("Cache full: {0}")]
    CacheFull(String),

    /// Backend could not be reached
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    /// Cached payload could not be encoded or decoded
    #[error("Cache serialization error: {0}")]
    Serialization(String),
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
