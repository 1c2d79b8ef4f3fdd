//! Read-Through User Service
//!
//! Name lookups check the cache first and fall back to the store on a miss,
//! caching whatever the store returns. Absent users are never cached.
//! Writes go to the store first and then invalidate the affected keys.
//!
//! A write generation guards population: a miss that read the store before
//! a write finished never puts its record back into the cache.


use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::cache::{Cache, CacheError, CacheStats, MAX_KEY_LENGTH};
use crate::error::{AppError, Result};
use crate::models::{validate_name, NewUser, User, MAX_NAME_LENGTH};
use crate::store::UserStore;

/// Longest cache name that still fits every valid user name in a key.
pub const MAX_CACHE_NAME_LENGTH: usize = MAX_KEY_LENGTH - KEY_SEPARATOR.len() - MAX_NAME_LENGTH;

const KEY_SEPARATOR: &str = "::";

/// Counters for one facade, combined with its cache's own stats.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ServiceStats {
    /// Lookups that reached the store
    pub store_queries: u64,
    pub cache: CacheStats,
}

/// Cache facade over a single [`UserStore`].
///
/// No lock is held across the store call, so concurrent misses on one key
/// may each query the store; the last write to the cache wins.
///
/// `write_generation` is bumped by every write after its store call. A miss
/// snapshots it before reading the store and only populates the cache if it
/// is unchanged; the check and the put happen under the same lock that
/// writes hold while bumping and invalidating.
pub struct CachedUserService {
    store: Arc<dyn UserStore>,
    cache: Arc<dyn Cache>,
    cache_name: String,
    store_queries: AtomicU64,
    write_generation: Mutex<u64>,
}

impl CachedUserService {
    /// `cache_name` prefixes every cache key as `<cache_name>::<user name>`.
    pub fn new(
        store: Arc<dyn UserStore>,
        cache: Arc<dyn Cache>,
        cache_name: impl Into<String>,
    ) -> Self {
        Self {
            store,
            cache,
            cache_name: cache_name.into(),
            store_queries: AtomicU64::new(0),
            write_generation: Mutex::new(0),
        }
    }

    /// Cache key for a user name.
    pub fn cache_key(&self, name: &str) -> String {
        format!("{}{}{}", self.cache_name, KEY_SEPARATOR, name)
    }

    // == Get By Name ==
    /// Read-through lookup. `Ok(None)` means no such user.
    pub async fn get_by_name(&self, name: &str) -> Result<Option<User>> {
        check_name(name)?;
        let key = self.cache_key(name);

        if let Some(payload) = self.cache.get(&key).await? {
            debug!(%key, "cache hit");
            let user = serde_json::from_str(&payload)
                .map_err(|e| CacheError::Serialization(e.to_string()))?;
            return Ok(Some(user));
        }

        debug!(%key, "cache miss");
        let generation = *self.write_generation.lock().await;
        self.store_queries.fetch_add(1, Ordering::Relaxed);
        let found = self.store.find_by_name(name).await.map_err(|e| {
            warn!(%key, error = %e, "store lookup failed");
            AppError::from(e)
        })?;

        let Some(user) = found else {
            return Ok(None);
        };

        let payload =
            serde_json::to_string(&user).map_err(|e| CacheError::Serialization(e.to_string()))?;

        let current = self.write_generation.lock().await;
        if *current != generation {
            debug!(%key, "write raced the lookup, not caching");
            return Ok(Some(user));
        }
        self.cache.put(&key, payload).await?;
        drop(current);

        debug!(%key, id = user.id, "cache populated");
        Ok(Some(user))
    }

    /// Name and age lookup straight against the store; never cached.
    pub async fn find_by_name_and_age(&self, name: &str, age: i32) -> Result<Option<User>> {
        check_name(name)?;
        self.store_queries.fetch_add(1, Ordering::Relaxed);
        Ok(self.store.find_by_name_and_age(name, age).await?)
    }

    // == Writes ==
    /// Inserts a user and drops any cached entry for its name.
    pub async fn create(&self, user: NewUser) -> Result<i64> {
        if let Some(msg) = user.validate() {
            return Err(AppError::InvalidRequest(msg));
        }
        let key = self.cache_key(&user.name);

        let id = self.store.insert(user).await?;
        self.invalidate(&key).await?;
        info!(%key, id, "user created");
        Ok(id)
    }

    /// Deletes users by name and drops the cached entry.
    pub async fn delete_by_name(&self, name: &str) -> Result<u64> {
        check_name(name)?;
        let key = self.cache_key(name);

        let removed = self.store.delete_by_name(name).await?;
        self.invalidate(&key).await?;
        info!(%key, removed, "users deleted by name");
        Ok(removed)
    }

    /// Deletes every user and empties the cache.
    pub async fn delete_all(&self) -> Result<u64> {
        let removed = self.store.delete_all().await?;
        {
            let mut generation = self.write_generation.lock().await;
            *generation += 1;
            self.cache.clear().await?;
        }
        info!(cache = %self.cache_name, removed, "all users deleted");
        Ok(removed)
    }

    async fn invalidate(&self, key: &str) -> Result<()> {
        let mut generation = self.write_generation.lock().await;
        *generation += 1;
        self.cache.invalidate(key).await?;
        Ok(())
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(self.store.count().await?)
    }

    pub async fn stats(&self) -> Result<ServiceStats> {
        Ok(ServiceStats {
            store_queries: self.store_queries.load(Ordering::Relaxed),
            cache: self.cache.stats().await?,
        })
    }
}

fn check_name(name: &str) -> Result<()> {
    match validate_name(name) {
        Some(msg) => Err(AppError::InvalidRequest(msg)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use std::sync::atomic::AtomicBool;
    use tokio::sync::Notify;

    use crate::cache::MemoryCache;
    use crate::store::{InMemoryUserStore, Result as StoreResult, StoreError};

    fn service_with(store: Arc<dyn UserStore>) -> (CachedUserService, MemoryCache) {
        let cache = MemoryCache::new(100, None);
        let service = CachedUserService::new(store, Arc::new(cache.clone()), "users");
        (service, cache)
    }

    fn memory_service() -> (CachedUserService, InMemoryUserStore, MemoryCache) {
        let store = InMemoryUserStore::new();
        let (service, cache) = service_with(Arc::new(store.clone()));
        (service, store, cache)
    }

    /// Store whose every call fails as if the backend were down.
    struct UnreachableStore;

    #[async_trait]
    impl UserStore for UnreachableStore {
        async fn find_by_name(&self, _: &str) -> StoreResult<Option<User>> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
        async fn find_by_name_and_age(&self, _: &str, _: i32) -> StoreResult<Option<User>> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
        async fn insert(&self, _: NewUser) -> StoreResult<i64> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
        async fn delete_by_name(&self, _: &str) -> StoreResult<u64> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
        async fn delete_all(&self) -> StoreResult<u64> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
        async fn count(&self) -> StoreResult<u64> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    /// Store whose next `find_by_name` stops after reading until released.
    struct ParkedStore {
        inner: InMemoryUserStore,
        park_next_read: AtomicBool,
        read_done: Notify,
        release: Notify,
    }

    impl ParkedStore {
        fn new(inner: InMemoryUserStore) -> Self {
            Self {
                inner,
                park_next_read: AtomicBool::new(true),
                read_done: Notify::new(),
                release: Notify::new(),
            }
        }
    }

    #[async_trait]
    impl UserStore for ParkedStore {
        async fn find_by_name(&self, name: &str) -> StoreResult<Option<User>> {
            let found = self.inner.find_by_name(name).await?;
            if self.park_next_read.swap(false, Ordering::SeqCst) {
                self.read_done.notify_one();
                self.release.notified().await;
            }
            Ok(found)
        }
        async fn find_by_name_and_age(&self, name: &str, age: i32) -> StoreResult<Option<User>> {
            self.inner.find_by_name_and_age(name, age).await
        }
        async fn insert(&self, user: NewUser) -> StoreResult<i64> {
            self.inner.insert(user).await
        }
        async fn delete_by_name(&self, name: &str) -> StoreResult<u64> {
            self.inner.delete_by_name(name).await
        }
        async fn delete_all(&self) -> StoreResult<u64> {
            self.inner.delete_all().await
        }
        async fn count(&self) -> StoreResult<u64> {
            self.inner.count().await
        }
    }

    /// Cache that refuses every call.
    struct UnreachableCache;

    #[async_trait]
    impl Cache for UnreachableCache {
        async fn get(&self, _: &str) -> crate::cache::Result<Option<String>> {
            Err(CacheError::Unavailable("no route to host".to_string()))
        }
        async fn put(&self, _: &str, _: String) -> crate::cache::Result<()> {
            Err(CacheError::Unavailable("no route to host".to_string()))
        }
        async fn invalidate(&self, _: &str) -> crate::cache::Result<()> {
            Err(CacheError::Unavailable("no route to host".to_string()))
        }
        async fn clear(&self) -> crate::cache::Result<()> {
            Err(CacheError::Unavailable("no route to host".to_string()))
        }
        async fn stats(&self) -> crate::cache::Result<CacheStats> {
            Err(CacheError::Unavailable("no route to host".to_string()))
        }
    }

    #[tokio::test]
    async fn test_lookup_scenario_hits_store_once() {
        let (service, store, _cache) = memory_service();

        assert_eq!(service.get_by_name("AAA").await.unwrap(), None);
        let queries_after_miss = service.stats().await.unwrap().store_queries;
        assert_eq!(queries_after_miss, 1);

        // Insert directly so the facade has not touched the key
        store.insert(NewUser::new("AAA", 20)).await.unwrap();

        let first = service.get_by_name("AAA").await.unwrap().unwrap();
        assert_eq!((first.name.as_str(), first.age), ("AAA", 20));
        assert_eq!(service.stats().await.unwrap().store_queries, 2);

        let second = service.get_by_name("AAA").await.unwrap().unwrap();
        assert_eq!(second, first);
        let stats = service.stats().await.unwrap();
        assert_eq!(stats.store_queries, 2);
        assert_eq!(stats.cache.hits, 1);
    }

    #[tokio::test]
    async fn test_not_found_is_not_cached() {
        let (service, _store, cache) = memory_service();

        assert_eq!(service.get_by_name("ghost").await.unwrap(), None);
        assert_eq!(service.get_by_name("ghost").await.unwrap(), None);

        assert!(cache.is_empty().await);
        assert_eq!(service.stats().await.unwrap().store_queries, 2);
    }

    #[tokio::test]
    async fn test_cache_key_prefix() {
        let (service, store, cache) = memory_service();
        store.insert(NewUser::new("AAA", 20)).await.unwrap();

        service.get_by_name("AAA").await.unwrap();

        assert_eq!(service.cache_key("AAA"), "users::AAA");
        assert!(cache.contains("users::AAA").await);
    }

    #[tokio::test]
    async fn test_create_invalidates_cached_name() {
        let (service, store, _cache) = memory_service();
        store.insert(NewUser::new("AAA", 20)).await.unwrap();
        service.get_by_name("AAA").await.unwrap();

        // Replace the only AAA through the facade
        service.delete_by_name("AAA").await.unwrap();
        service.create(NewUser::new("AAA", 35)).await.unwrap();

        let user = service.get_by_name("AAA").await.unwrap().unwrap();
        assert_eq!(user.age, 35);
    }

    #[tokio::test]
    async fn test_delete_by_name_evicts() {
        let (service, _store, cache) = memory_service();
        service.create(NewUser::new("AAA", 20)).await.unwrap();
        service.get_by_name("AAA").await.unwrap();
        assert!(cache.contains("users::AAA").await);

        assert_eq!(service.delete_by_name("AAA").await.unwrap(), 1);

        assert!(!cache.contains("users::AAA").await);
        assert_eq!(service.get_by_name("AAA").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_all_clears_cache() {
        let (service, _store, cache) = memory_service();
        service.create(NewUser::new("AAA", 20)).await.unwrap();
        service.create(NewUser::new("BBB", 30)).await.unwrap();
        service.get_by_name("AAA").await.unwrap();
        service.get_by_name("BBB").await.unwrap();

        assert_eq!(service.delete_all().await.unwrap(), 2);
        assert!(cache.is_empty().await);
        assert_eq!(service.count().await.unwrap(), 0);
        assert_eq!(service.get_by_name("AAA").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_by_name_and_age_bypasses_cache() {
        let (service, _store, cache) = memory_service();
        service.create(NewUser::new("AAA", 20)).await.unwrap();

        let user = service.find_by_name_and_age("AAA", 20).await.unwrap();
        assert!(user.is_some());
        assert!(service.find_by_name_and_age("AAA", 21).await.unwrap().is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_store_failure_leaves_cache_untouched() {
        let (service, cache) = service_with(Arc::new(UnreachableStore));

        let result = service.get_by_name("AAA").await;

        assert!(matches!(result, Err(AppError::StoreUnavailable(_))));
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_failed_write_does_not_invalidate() {
        let cache = MemoryCache::new(10, None);
        let service =
            CachedUserService::new(Arc::new(UnreachableStore), Arc::new(cache.clone()), "users");
        cache
            .put("users::AAA", r#"{"id":1,"name":"AAA","age":20}"#.to_string())
            .await
            .unwrap();

        assert!(service.delete_by_name("AAA").await.is_err());
        assert!(cache.contains("users::AAA").await);
    }

    #[tokio::test]
    async fn test_cache_failure_propagates() {
        let service = CachedUserService::new(
            Arc::new(InMemoryUserStore::new()),
            Arc::new(UnreachableCache),
            "users",
        );

        let result = service.get_by_name("AAA").await;
        assert!(matches!(result, Err(AppError::CacheUnavailable(_))));
    }

    #[tokio::test]
    async fn test_corrupt_cache_payload_is_serialization_error() {
        let (service, _store, cache) = memory_service();
        cache
            .put("users::AAA", "not json".to_string())
            .await
            .unwrap();

        let result = service.get_by_name("AAA").await;
        assert!(matches!(result, Err(AppError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_empty_name_rejected() {
        let (service, _store, _cache) = memory_service();

        assert!(matches!(
            service.get_by_name("").await,
            Err(AppError::InvalidRequest(_))
        ));
        assert!(matches!(
            service.create(NewUser::new("", 1)).await,
            Err(AppError::InvalidRequest(_))
        ));
        assert!(matches!(
            service.get_by_name("   ").await,
            Err(AppError::InvalidRequest(_))
        ));
        assert!(matches!(
            service.create(NewUser::new("   ", 1)).await,
            Err(AppError::InvalidRequest(_))
        ));
        assert_eq!(service.stats().await.unwrap().store_queries, 0);
    }

    #[tokio::test]
    async fn test_concurrent_misses_settle_on_one_entry() {
        let (service, store, cache) = memory_service();
        store.insert(NewUser::new("AAA", 20)).await.unwrap();
        let service = Arc::new(service);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service.get_by_name("AAA").await.unwrap().unwrap()
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap().age, 20);
        }

        assert_eq!(cache.len().await, 1);
        let queries = service.stats().await.unwrap().store_queries;
        assert!((1..=8).contains(&queries));
    }

    /// Runs `write` while a miss on "AAA" is parked between its store read
    /// and its cache population.
    async fn lookup_racing_write<F, Fut>(write: F) -> (Arc<CachedUserService>, MemoryCache)
    where
        F: FnOnce(Arc<CachedUserService>) -> Fut,
        Fut: std::future::Future<Output = ()>,
    {
        let inner = InMemoryUserStore::new();
        inner.insert(NewUser::new("AAA", 20)).await.unwrap();
        let store = Arc::new(ParkedStore::new(inner));
        let cache = MemoryCache::new(100, None);
        let service = Arc::new(CachedUserService::new(
            store.clone(),
            Arc::new(cache.clone()),
            "users",
        ));

        let lookup = {
            let service = service.clone();
            tokio::spawn(async move { service.get_by_name("AAA").await })
        };
        store.read_done.notified().await;

        write(service.clone()).await;

        store.release.notify_one();
        // The parked read saw the record before the write landed
        assert!(lookup.await.unwrap().unwrap().is_some());

        (service, cache)
    }

    #[tokio::test]
    async fn test_delete_during_lookup_is_not_recached() {
        let (service, cache) = lookup_racing_write(|service| async move {
            assert_eq!(service.delete_by_name("AAA").await.unwrap(), 1);
        })
        .await;

        assert!(!cache.contains("users::AAA").await);
        assert_eq!(service.get_by_name("AAA").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_all_during_lookup_is_not_recached() {
        let (service, cache) = lookup_racing_write(|service| async move {
            assert_eq!(service.delete_all().await.unwrap(), 1);
        })
        .await;

        assert!(cache.is_empty().await);
        assert_eq!(service.get_by_name("AAA").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_during_lookup_is_not_recached() {
        let (service, cache) = lookup_racing_write(|service| async move {
            service.delete_by_name("AAA").await.unwrap();
            service.create(NewUser::new("AAA", 45)).await.unwrap();
        })
        .await;

        assert!(!cache.contains("users::AAA").await);
        assert_eq!(service.get_by_name("AAA").await.unwrap().unwrap().age, 45);
    }

    #[tokio::test]
    async fn test_longest_key_still_caches() {
        let store = InMemoryUserStore::new();
        let name = "N".repeat(MAX_NAME_LENGTH);
        store.insert(NewUser::new(name.clone(), 20)).await.unwrap();
        let cache = MemoryCache::new(10, None);
        let service = CachedUserService::new(
            Arc::new(store),
            Arc::new(cache.clone()),
            "c".repeat(MAX_CACHE_NAME_LENGTH),
        );

        let user = service.get_by_name(&name).await.unwrap().unwrap();

        assert_eq!(user.name, name);
        assert_eq!(service.cache_key(&name).len(), MAX_KEY_LENGTH);
        assert!(cache.contains(&service.cache_key(&name)).await);
    }
}
