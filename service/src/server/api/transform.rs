//! Protobuf RPC endpoints for the two transforms.

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::Response;
use image_wire::{CONTENT_TYPE, EdgeDetectionRequest, ImageBuffer, Rotation, RotationRequest};
use prost::Message;

use crate::app::SharedState;
use crate::services::transform;

use super::{ApiError, err_json, transform_error};

type RpcResult = Result<Response, ApiError>;

/// POST /rpc/rotate-image
pub async fn rotate_image(State(state): State<SharedState>, body: Bytes) -> RpcResult {
    let request = decode::<RotationRequest>(body)?;
    let degrees =
        Rotation::try_from(i32::from(request.quarter_turns())).map_or(0, Rotation::degrees);
    tracing::debug!(degrees, "RotateImage call");
    let image = transform::rotate_image(&state, request)
        .await
        .map_err(transform_error)?;
    protobuf_response(&image)
}

/// POST /rpc/edge-detection
pub async fn edge_detection(State(state): State<SharedState>, body: Bytes) -> RpcResult {
    let request = decode::<EdgeDetectionRequest>(body)?;
    tracing::debug!("EdgeDetection call");
    let image = transform::edge_detection(&state, request)
        .await
        .map_err(transform_error)?;
    protobuf_response(&image)
}

fn decode<M: Message + Default>(body: Bytes) -> Result<M, ApiError> {
    M::decode(body).map_err(|e| {
        tracing::warn!(error = %e, "Undecodable request body");
        err_json(
            StatusCode::BAD_REQUEST,
            "bad_request",
            &format!("Invalid request body: {e}"),
        )
    })
}

fn protobuf_response(image: &ImageBuffer) -> RpcResult {
    Response::builder()
        .header(header::CONTENT_TYPE, CONTENT_TYPE)
        .body(Body::from(image.encode_to_vec()))
        .map_err(|e| err_json(StatusCode::INTERNAL_SERVER_ERROR, "internal", &e.to_string()))
}
