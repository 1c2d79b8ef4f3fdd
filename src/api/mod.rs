//! API Module
//!
//! HTTP handlers and routing for the user service.
//!
//! # Endpoints
//! - `POST /user` - Create a user
//! - `GET /user/:name` - Look up a user through the cache
//! - `DELETE /user/:name` - Delete users by name
//! - `GET /user/count` - Count users
//! - `DELETE /user/all` - Delete every user
//! - `GET /stats` - Cache statistics per datasource
//! - `GET /health` - Health check endpoint
//!
//! User routes take `?ds=primary|secondary` (default primary).

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
