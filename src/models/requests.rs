//! Request DTOs for the user API
//!
//! Query strings and bodies accepted by the handlers.

use serde::Deserialize;

use crate::datasource::Datasource;
use crate::error::{AppError, Result};
use crate::models::user::validate_fields;

/// `?ds=` selector accepted by every user route.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasourceQuery {
    /// Datasource name; primary when absent
    #[serde(default)]
    pub ds: Option<String>,
}

impl DatasourceQuery {
    pub fn datasource(&self) -> Result<Datasource> {
        parse_datasource(self.ds.as_deref())
    }
}

/// Query for GET /user/:name
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupQuery {
    #[serde(default)]
    pub ds: Option<String>,
    /// When set, match on name and age without the cache
    #[serde(default)]
    pub age: Option<i32>,
}

impl LookupQuery {
    pub fn datasource(&self) -> Result<Datasource> {
        parse_datasource(self.ds.as_deref())
    }
}

fn parse_datasource(ds: Option<&str>) -> Result<Datasource> {
    ds.map_or(Ok(Datasource::Primary), |name| name.parse())
}

/// Request body for POST /user
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub age: i32,
}

impl CreateUserRequest {
    /// Rejects payloads the store would refuse.
    pub fn validate(&self) -> Result<()> {
        match validate_fields(&self.name, self.age) {
            Some(msg) => Err(AppError::InvalidRequest(msg)),
            None => Ok(()),
        }
    }
}
