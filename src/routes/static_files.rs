use std::sync::Arc;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

use crate::config::ServerConfig;
use crate::core::storage::STATIC_URL_PREFIX;
use crate::state::AppState;

/// Serve the front-end page at `/` and the static directory (including
/// generated replies) under `/static`.
pub fn create_static_router(config: &ServerConfig) -> Router<Arc<AppState>> {
    Router::new()
        .route_service("/", ServeFile::new(config.index_path()))
        .nest_service(STATIC_URL_PREFIX, ServeDir::new(&config.static_dir))
}
