//! API Handlers
//!
//! HTTP request handlers for the user endpoints. Every user route resolves
//! its datasource from `?ds=` before touching a facade.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::config::Config;
use crate::datasource::{Datasource, DatasourceRegistry};
use crate::error::{AppError, Result};
use crate::models::{
    CountResponse, CreateUserRequest, CreateUserResponse, DatasourceQuery,
    DatasourceStatsResponse, DeleteResponse, HealthResponse, LookupQuery, NewUser, StatsResponse,
    User,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<DatasourceRegistry>,
}

impl AppState {
    pub fn new(registry: DatasourceRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// In-memory datasources sized from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(DatasourceRegistry::in_memory(config))
    }
}

/// Handler for POST /user
pub async fn create_user_handler(
    State(state): State<AppState>,
    Query(query): Query<DatasourceQuery>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<CreateUserResponse>> {
    req.validate()?;
    let datasource = query.datasource()?;

    let id = state
        .registry
        .get(datasource)
        .create(NewUser::new(req.name, req.age))
        .await?;

    Ok(Json(CreateUserResponse { id, datasource }))
}

/// Handler for GET /user/:name
///
/// Read-through lookup, or an uncached name+age match when `?age=` is set.
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<User>> {
    let service = state.registry.get(query.datasource()?);

    let found = match query.age {
        Some(age) => service.find_by_name_and_age(&name, age).await?,
        None => service.get_by_name(&name).await?,
    };

    found.map(Json).ok_or(AppError::NotFound(name))
}

/// Handler for DELETE /user/:name
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<DatasourceQuery>,
) -> Result<Json<DeleteResponse>> {
    let datasource = query.datasource()?;
    let deleted = state.registry.get(datasource).delete_by_name(&name).await?;

    Ok(Json(DeleteResponse {
        deleted,
        datasource,
    }))
}

/// Handler for GET /user/count
pub async fn count_handler(
    State(state): State<AppState>,
    Query(query): Query<DatasourceQuery>,
) -> Result<Json<CountResponse>> {
    let datasource = query.datasource()?;
    let count = state.registry.get(datasource).count().await?;

    Ok(Json(CountResponse { count, datasource }))
}

/// Handler for DELETE /user/all
pub async fn delete_all_handler(
    State(state): State<AppState>,
    Query(query): Query<DatasourceQuery>,
) -> Result<Json<DeleteResponse>> {
    let datasource = query.datasource()?;
    let deleted = state.registry.get(datasource).delete_all().await?;

    Ok(Json(DeleteResponse {
        deleted,
        datasource,
    }))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let mut datasources = BTreeMap::new();
    for datasource in Datasource::ALL {
        let stats = state.registry.get(datasource).stats().await?;
        datasources.insert(datasource, DatasourceStatsResponse::from(stats));
    }

    Ok(Json(StatsResponse { datasources }))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
