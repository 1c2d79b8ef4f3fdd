//! Response DTOs for the user API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::datasource::Datasource;
use crate::service::ServiceStats;

/// Response body for POST /user
#[derive(Debug, Clone, Serialize)]
pub struct CreateUserResponse {
    /// Store-assigned id
    pub id: i64,
    pub datasource: Datasource,
}

/// Response body for DELETE /user/:name and DELETE /user/all
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Number of users removed
    pub deleted: u64,
    pub datasource: Datasource,
}

/// Response body for GET /user/count
#[derive(Debug, Clone, Serialize)]
pub struct CountResponse {
    pub count: u64,
    pub datasource: Datasource,
}

/// Per-datasource section of GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct DatasourceStatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub invalidations: u64,
    pub total_entries: usize,
    pub store_queries: u64,
    pub hit_rate: f64,
}

impl From<ServiceStats> for DatasourceStatsResponse {
    fn from(stats: ServiceStats) -> Self {
        Self {
            hit_rate: stats.cache.hit_rate(),
            hits: stats.cache.hits,
            misses: stats.cache.misses,
            evictions: stats.cache.evictions,
            expirations: stats.cache.expirations,
            invalidations: stats.cache.invalidations,
            total_entries: stats.cache.total_entries,
            store_queries: stats.store_queries,
        }
    }
}

/// Response body for GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub datasources: BTreeMap<Datasource, DatasourceStatsResponse>,
}

/// Response body for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
