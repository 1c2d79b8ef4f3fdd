//! In-process cache backend.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::trace;

use super::{Cache, CacheEngine, CacheStats, Result};

/// Shared handle to a locked [`CacheEngine`].
///
/// Cloning yields another handle to the same entries.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    engine: Arc<RwLock<CacheEngine>>,
}

impl MemoryCache {
    /// Creates a cache bounded to `max_entries`; `ttl` in seconds, None = no expiry.
    pub fn new(max_entries: usize, ttl: Option<u64>) -> Self {
        Self {
            engine: Arc::new(RwLock::new(CacheEngine::new(max_entries, ttl))),
        }
    }

    /// Sweeps expired entries; returns how many were removed.
    pub async fn cleanup_expired(&self) -> usize {
        self.engine.write().await.cleanup_expired()
    }

    pub async fn len(&self) -> usize {
        self.engine.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.engine.read().await.is_empty()
    }

    /// Whether a live entry exists, without counting a hit or miss.
    pub async fn contains(&self, key: &str) -> bool {
        self.engine.read().await.peek(key).is_some()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        // Write lock: a hit updates recency and counters
        Ok(self.engine.write().await.get(key))
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        self.engine.write().await.put(key, value)
    }

    async fn invalidate(&self, key: &str) -> Result<()> {
        let removed = self.engine.write().await.remove(key);
        trace!(key, removed, "cache invalidate");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let removed = self.engine.write().await.clear();
        trace!(removed, "cache cleared");
        Ok(())
    }

    async fn stats(&self) -> Result<CacheStats> {
        Ok(self.engine.read().await.stats())
    }
}
