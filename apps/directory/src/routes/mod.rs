pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, Router};

use crate::directory::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/",
            get(handlers::handle_upload_form).post(handlers::handle_generate),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
