use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{api, story};
use crate::state::AppState;
use std::sync::Arc;

/// Largest accepted audio upload.
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Create the story API router
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(api::health_check))
        .route("/start", post(story::start_session))
        .route("/process_audio", post(story::process_audio))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
}
