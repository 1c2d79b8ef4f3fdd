//! Datasource Registry
//!
//! Each datasource pairs its own store with its own cache, so a record
//! written to one datasource is invisible to the others. Callers always name
//! the datasource they want; there is no ambient routing.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cache::MemoryCache;
use crate::config::Config;
use crate::error::AppError;
use crate::service::CachedUserService;
use crate::store::InMemoryUserStore;

/// Logical datasource name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Datasource {
    #[default]
    Primary,
    Secondary,
}

impl Datasource {
    pub const ALL: [Datasource; 2] = [Datasource::Primary, Datasource::Secondary];

    pub fn as_str(&self) -> &'static str {
        match self {
            Datasource::Primary => "primary",
            Datasource::Secondary => "secondary",
        }
    }
}

impl fmt::Display for Datasource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Datasource {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "primary" => Ok(Datasource::Primary),
            "secondary" => Ok(Datasource::Secondary),
            other => Err(AppError::InvalidRequest(format!(
                "Unknown datasource '{}'",
                other
            ))),
        }
    }
}

/// One facade per datasource.
pub struct DatasourceRegistry {
    services: HashMap<Datasource, Arc<CachedUserService>>,
    /// In-memory caches, kept for the expiry sweeper
    memory_caches: Vec<MemoryCache>,
}

impl DatasourceRegistry {
    /// Builds an in-memory store and cache for every datasource.
    pub fn in_memory(config: &Config) -> Self {
        let mut services = HashMap::new();
        let mut memory_caches = Vec::new();

        for datasource in Datasource::ALL {
            let cache = MemoryCache::new(config.max_entries, config.cache_ttl());
            let service = CachedUserService::new(
                Arc::new(InMemoryUserStore::new()),
                Arc::new(cache.clone()),
                config.cache_name.clone(),
            );
            services.insert(datasource, Arc::new(service));
            memory_caches.push(cache);
        }

        Self {
            services,
            memory_caches,
        }
    }

    /// The facade serving `datasource`.
    pub fn get(&self, datasource: Datasource) -> Arc<CachedUserService> {
        // Every variant is registered at construction
        self.services[&datasource].clone()
    }

    pub fn memory_caches(&self) -> &[MemoryCache] {
        &self.memory_caches
    }
}
