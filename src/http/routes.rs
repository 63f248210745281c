use axum::{Router, routing::get};

use crate::{
    http::handlers::{
        action_handler, delete_handler, health_handler, read_handler, update_handler,
    },
    state::AppState,
};

/// The whole gateway: one multiplexed endpoint plus a liveness probe.
pub fn create_http_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(read_handler)
                .post(action_handler)
                .put(update_handler)
                .delete(delete_handler),
        )
        .route("/health", get(health_handler))
        .with_state(state)
}
