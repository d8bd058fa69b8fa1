//! The transform service: validate, transform, repackage.

use image_wire::{EdgeDetectionRequest, ImageBuffer, RotationRequest, WireError, validate};
use tracing::debug;

use crate::edges::{EdgeThresholds, detect_edges};
use crate::rotate::rotate;

/// The two operations an image transform service exposes.
///
/// Implementations are stateless per call. Validation failures are returned
/// unchanged; transforms themselves cannot fail.
pub trait ImageTransformService {
    fn rotate_image(&self, request: RotationRequest) -> Result<ImageBuffer, WireError>;

    fn edge_detection(&self, request: EdgeDetectionRequest) -> Result<ImageBuffer, WireError>;
}

/// In-process implementation backed by [`rotate`] and [`detect_edges`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Transformer {
    thresholds: EdgeThresholds,
}

impl Transformer {
    pub fn new(thresholds: EdgeThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> EdgeThresholds {
        self.thresholds
    }
}

impl ImageTransformService for Transformer {
    fn rotate_image(&self, request: RotationRequest) -> Result<ImageBuffer, WireError> {
        let k = request.quarter_turns();
        let grid = validate(request.image.unwrap_or_default())?;
        let out = rotate(grid, k).into_buffer();
        debug!(width = out.width, height = out.height, k, "Rotation complete");
        Ok(out)
    }

    fn edge_detection(&self, request: EdgeDetectionRequest) -> Result<ImageBuffer, WireError> {
        let grid = validate(request.image.unwrap_or_default())?;
        let (width, height) = (grid.width(), grid.height());
        let edges = detect_edges(grid, self.thresholds);
        debug!(width, height, "Edge detection complete");
        Ok(ImageBuffer::new(false, width, height, edges.into_raw()))
    }
}
