//! API Routes
//!
//! Configures the Axum router with all user service endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    count_handler, create_user_handler, delete_all_handler, delete_user_handler,
    get_user_handler, health_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// Static segments (`/user/count`, `/user/all`) take precedence over the
/// `/user/:name` capture, so those two names cannot be looked up by path.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/user", post(create_user_handler))
        .route("/user/count", get(count_handler))
        .route("/user/all", delete(delete_all_handler))
        .route(
            "/user/:name",
            get(get_user_handler).delete(delete_user_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
