pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::analysis::validation::MAX_FILE_SIZE_BYTES;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        // Allow the 10 MiB document plus form overhead; the validator enforces
        // the user-facing ceiling with a readable message.
        .layer(DefaultBodyLimit::max(MAX_FILE_SIZE_BYTES + 64 * 1024))
        .with_state(state)
}
