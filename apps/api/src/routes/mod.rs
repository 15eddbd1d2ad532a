pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::ats::handlers;
use crate::state::AppState;

/// Room for the multipart framing and text fields around the resume file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let scan_body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/ats/analyze", post(handlers::handle_analyze))
        .route(
            "/api/v1/ats/scan",
            post(handlers::handle_scan).layer(DefaultBodyLimit::max(scan_body_limit)),
        )
        .route("/api/v1/ats/history", get(handlers::handle_history))
        .route(
            "/api/v1/ats/scans/:id",
            get(handlers::handle_get_scan).delete(handlers::handle_delete_scan),
        )
        .with_state(state)
}
