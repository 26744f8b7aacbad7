pub mod api;
pub mod static_files;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Full application router with state applied.
///
/// Cross-cutting layers (CORS, rate limiting, security headers) are added
/// by the binary.
pub fn create_app(state: Arc<AppState>) -> Router {
    let static_routes = static_files::create_static_router(&state.config);

    api::create_api_router()
        .merge(static_routes)
        .with_state(state)
}
