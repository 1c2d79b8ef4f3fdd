//! Error types for the user service
//!
//! Store and cache failures convert into [`AppError`], which renders as a
//! JSON error body with a matching status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::cache::CacheError;
use crate::store::StoreError;

// == App Error Enum ==
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// No user matches the lookup
    #[error("User not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The backing store failed; not retried
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// The cache failed; treated as misconfiguration
    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),

    /// A cached payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => AppError::StoreUnavailable(msg),
            StoreError::InvalidRecord(msg) => AppError::InvalidRequest(msg),
        }
    }
}

impl From<CacheError> for AppError {
    fn from(err: CacheError) -> Self {
        match err {
            CacheError::Serialization(msg) => AppError::Serialization(msg),
            CacheError::InvalidKey(msg) => AppError::InvalidRequest(msg),
            other => AppError::CacheUnavailable(other.to_string()),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::CacheUnavailable(_) | AppError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
pub type Result<T> = std::result::Result<T, AppError>;
