//! Expiry Sweep Task
//!
//! Background task that periodically drops expired cache entries from every
//! datasource's cache. Only spawned when a cache TTL is configured.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::MemoryCache;

/// Spawns the sweeper; abort the returned handle to stop it.
pub fn spawn_cleanup_task(caches: Vec<MemoryCache>, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            caches = caches.len(),
            "Starting cache expiry sweep every {} seconds", cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let mut removed = 0;
            for cache in &caches {
                removed += cache.cleanup_expired().await;
            }

            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}
