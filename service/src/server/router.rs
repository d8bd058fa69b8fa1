use axum::extract::{DefaultBodyLimit, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use image_wire::{EDGE_DETECTION_PATH, ROTATE_IMAGE_PATH};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use super::api;
use crate::app::SharedState;

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    let body_limit = state.config().max_body_bytes;

    Router::new()
        // --- Core ---
        .route("/status", get(status_handler))
        // --- Transforms ---
        .route(ROTATE_IMAGE_PATH, post(api::transform::rotate_image))
        .route(EDGE_DETECTION_PATH, post(api::transform::edge_detection))
        // --- Middleware ---
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn status_handler(State(state): State<SharedState>) -> Json<Value> {
    let pool = state.pool();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "workers": pool.workers(),
        "queue_capacity": pool.queue_capacity(),
        "queued": pool.queued(),
    }))
}
