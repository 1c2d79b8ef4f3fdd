//! Configuration Module
//!
//! Loads service configuration from environment variables.

use std::env;
use std::str::FromStr;

use tracing::warn;

use crate::service::MAX_CACHE_NAME_LENGTH;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Capacity of each datasource's cache
    pub max_entries: usize,
    /// Cache TTL in seconds, 0 = entries never expire
    pub cache_ttl_secs: u64,
    /// Cache region name, used as the key prefix
    pub cache_name: String,
    /// HTTP server port
    pub server_port: u16,
    /// Seconds between expiry sweeps
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Cache capacity per datasource (default: 1000)
    /// - `CACHE_TTL` - Entry lifetime in seconds, 0 disables (default: 0)
    /// - `CACHE_NAME` - Cache region name, at most 126 bytes (default: users)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Expiry sweep frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            cache_ttl_secs: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl_secs),
            cache_name: env::var("CACHE_NAME")
                .ok()
                .filter(|v| !v.is_empty())
                .filter(|v| {
                    let fits = v.len() <= MAX_CACHE_NAME_LENGTH;
                    if !fits {
                        warn!(
                            "CACHE_NAME longer than {} bytes, using default",
                            MAX_CACHE_NAME_LENGTH
                        );
                    }
                    fits
                })
                .unwrap_or(defaults.cache_name),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cleanup_interval: parse_var::<u64>("CLEANUP_INTERVAL")
                .filter(|v| *v > 0)
                .unwrap_or(defaults.cleanup_interval),
        }
    }

    /// TTL handed to caches, None when expiry is disabled.
    pub fn cache_ttl(&self) -> Option<u64> {
        (self.cache_ttl_secs > 0).then_some(self.cache_ttl_secs)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            cache_ttl_secs: 0,
            cache_name: "users".to_string(),
            server_port: 3000,
            cleanup_interval: 1,
        }
    }
}
