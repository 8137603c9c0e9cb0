use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use super::handlers::{self, AppState};

/// Largest CSV upload accepted, in bytes
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/recipes", get(handlers::recipes))
        .route("/api/env-check", get(handlers::env_check))
        .route(
            "/api/admin/upload-csv",
            post(handlers::upload_csv).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .with_state(state)
}
