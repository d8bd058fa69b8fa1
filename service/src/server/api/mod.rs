//! RPC handlers and shared error responses.

pub mod transform;

use axum::Json;
use axum::http::StatusCode;
use serde_json::{Value, json};

use image_wire::WireError;

use crate::services::pool::PoolError;
use crate::services::transform::TransformError;

pub type ApiError = (StatusCode, Json<Value>);

/// Standard error response.
pub fn err_json(status: StatusCode, kind: &str, message: &str) -> ApiError {
    (
        status,
        Json(json!({ "status": "error", "kind": kind, "error": message })),
    )
}

/// Map a failed transform call onto a caller-visible error.
pub fn transform_error(err: TransformError) -> ApiError {
    let message = err.to_string();
    match err {
        TransformError::Wire(WireError::MalformedImage { actual, expected }) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "status": "error",
                "kind": "malformed_image",
                "error": message,
                "expected": expected,
                "actual": actual,
            })),
        ),
        TransformError::Pool(PoolError::QueueFull(_) | PoolError::Closed) => {
            err_json(StatusCode::SERVICE_UNAVAILABLE, "overloaded", &message)
        }
        TransformError::Pool(PoolError::WorkerLost) => {
            err_json(StatusCode::INTERNAL_SERVER_ERROR, "internal", &message)
        }
    }
}
