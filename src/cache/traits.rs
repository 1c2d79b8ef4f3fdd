use async_trait::async_trait;

use super::{CacheStats, Result};

/// Key-value cache capability used by the read-through facade.
///
/// Values are serialized records; the cache never interprets them.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value by key, `None` on miss.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores a value, replacing any previous one.
    async fn put(&self, key: &str, value: String) -> Result<()>;

    /// Drops the value for a key. Invalidating an absent key is not an error.
    async fn invalidate(&self, key: &str) -> Result<()>;

    /// Drops every value held by this cache.
    async fn clear(&self) -> Result<()>;

    /// Current counters.
    async fn stats(&self) -> Result<CacheStats>;
}
