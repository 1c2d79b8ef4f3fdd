//! Cache Entry Module
//!
//! A single cached payload with its optional expiry.

use chrono::{DateTime, Duration, Utc};

// == Cache Entry ==
/// A serialized record held by the cache.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Serialized record (JSON text)
    pub value: String,
    /// When the entry stops being served, None = never
    pub expires_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    /// Creates an entry stamped with the current time.
    ///
    /// `ttl_seconds` of `None` produces an entry that never expires.
    pub fn new(value: String, ttl_seconds: Option<u64>) -> Self {
        // A TTL too large to represent is treated as no expiry.
        let expires_at = ttl_seconds
            .and_then(|ttl| i64::try_from(ttl).ok())
            .and_then(Duration::try_seconds)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl));

        Self { value, expires_at }
    }

    // == Is Expired ==
    /// An entry is expired once the current time reaches its expiry instant.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Expiry check against an explicit clock reading.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(expires) if now >= expires)
    }

    /// Remaining lifetime in seconds, `None` when the entry never expires.
    #[cfg(test)]
    fn ttl_remaining(&self) -> Option<u64> {
        self.expires_at.map(|expires| {
            let remaining = (expires - Utc::now()).num_seconds();
            u64::try_from(remaining).unwrap_or(0)
        })
    }
}
