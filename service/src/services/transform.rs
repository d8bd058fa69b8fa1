//! Dispatch of transform calls onto the worker pool.

use image_wire::{EdgeDetectionRequest, ImageBuffer, RotationRequest, WireError};

use crate::app::SharedState;
use crate::services::pool::PoolError;

/// Why a transform call failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    #[error(transparent)]
    Wire(#[from] WireError),

    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Run `RotateImage` on a pool worker.
pub async fn rotate_image(
    state: &SharedState,
    request: RotationRequest,
) -> Result<ImageBuffer, TransformError> {
    let service = state.service();
    let image = state
        .pool()
        .run(move || service.rotate_image(request))
        .await??;
    Ok(image)
}

/// Run `EdgeDetection` on a pool worker.
pub async fn edge_detection(
    state: &SharedState,
    request: EdgeDetectionRequest,
) -> Result<ImageBuffer, TransformError> {
    let service = state.service();
    let image = state
        .pool()
        .run(move || service.edge_detection(request))
        .await??;
    Ok(image)
}
