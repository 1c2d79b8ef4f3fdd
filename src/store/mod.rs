//! User Store Module
//!
//! The keyed store behind the cache facade. Each datasource owns one store;
//! stores never share records.

mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewUser, User};

pub use memory::InMemoryUserStore;

/// Errors raised by store backends.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Backend could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Record rejected by the store
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Named query methods over `User` records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// The user with this name; the lowest id wins when names repeat.
    async fn find_by_name(&self, name: &str) -> Result<Option<User>>;

    /// The user matching both name and age.
    async fn find_by_name_and_age(&self, name: &str, age: i32) -> Result<Option<User>>;

    /// Inserts a record and returns its assigned id.
    async fn insert(&self, user: NewUser) -> Result<i64>;

    /// Deletes every user with this name, returning how many were removed.
    async fn delete_by_name(&self, name: &str) -> Result<u64>;

    /// Deletes every user, returning how many were removed.
    async fn delete_all(&self) -> Result<u64>;

    /// Number of stored users.
    async fn count(&self) -> Result<u64>;
}
