//! Records and request/response models
//!
//! `user` holds the stored record types; `requests` and `responses` are the
//! HTTP DTOs.

pub mod requests;
pub mod responses;
pub mod user;

pub use requests::{CreateUserRequest, DatasourceQuery, LookupQuery};
pub use responses::{
    CountResponse, CreateUserResponse, DatasourceStatsResponse, DeleteResponse, HealthResponse,
    StatsResponse,
};
pub use user::{validate_fields, validate_name, NewUser, User, MAX_NAME_LENGTH};
