//! Cache Module
//!
//! The [`Cache`] capability consumed by the read-through facade, and an
//! in-memory LRU backend for it with optional TTL expiry.

mod engine;
mod entry;
mod error;
mod lru;
mod memory;
mod stats;
mod traits;


pub use engine::CacheEngine;
pub use entry::CacheEntry;
pub use error::{CacheError, Result};
pub use lru::LruTracker;
pub use memory::MemoryCache;
pub use stats::CacheStats;
pub use traits::Cache;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed serialized value size in bytes
pub const MAX_VALUE_SIZE: usize = 64 * 1024;
