//! Background Tasks Module
//!
//! - Expiry sweep: drops expired cache entries at the configured interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
