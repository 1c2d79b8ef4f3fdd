//! In-memory user store.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Result, StoreError, UserStore};
use crate::models::{NewUser, User};

#[derive(Debug)]
struct Table {
    /// Rows keyed by id; ordered so name lookups return the lowest id
    rows: BTreeMap<i64, User>,
    next_id: i64,
}

/// `UserStore` backed by an ordered map behind a lock.
///
/// Clones share the same table. Data is lost when the last handle drops.
#[derive(Debug, Clone)]
pub struct InMemoryUserStore {
    table: Arc<RwLock<Table>>,
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<User>> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|u| u.name == name).cloned())
    }

    async fn find_by_name_and_age(&self, name: &str, age: i32) -> Result<Option<User>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .find(|u| u.name == name && u.age == age)
            .cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<i64> {
        if let Some(msg) = user.validate() {
            return Err(StoreError::InvalidRecord(msg));
        }

        let mut table = self.table.write().await;
        let id = table.next_id;
        table.next_id += 1;
        table.rows.insert(id, user.into_user(id));
        Ok(id)
    }

    async fn delete_by_name(&self, name: &str) -> Result<u64> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|_, u| u.name != name);
        Ok((before - table.rows.len()) as u64)
    }

    async fn delete_all(&self) -> Result<u64> {
        let mut table = self.table.write().await;
        let removed = table.rows.len() as u64;
        table.rows.clear();
        Ok(removed)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.table.read().await.rows.len() as u64)
    }
}
