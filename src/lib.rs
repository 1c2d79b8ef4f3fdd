//! User Cache - user lookups through a read-through cache
//!
//! Each datasource pairs a keyed user store with its own cache. Lookups by
//! name are served from the cache when possible and populate it on a miss;
//! writes invalidate the affected entries.

pub mod api;
pub mod cache;
pub mod config;
pub mod datasource;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use datasource::{Datasource, DatasourceRegistry};
pub use service::CachedUserService;
pub use tasks::spawn_cleanup_task;
