//! Canny edge detection producing a binary edge map.
//!
//! Color input is reduced to luma first. Gradient magnitudes above `high` are
//! strong edges, those below `low` are dropped, and the band in between is
//! kept only where it links to a strong edge (hysteresis).

use image::{GrayImage, imageops};
use image_wire::PixelGrid;
use tracing::debug;

/// Default lower hysteresis threshold, in intensity units.
pub const DEFAULT_LOW_THRESHOLD: f32 = 100.0;

/// Default upper hysteresis threshold, in intensity units.
pub const DEFAULT_HIGH_THRESHOLD: f32 = 200.0;

/// Hysteresis thresholds for the edge detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeThresholds {
    pub low: f32,
    pub high: f32,
}

impl Default for EdgeThresholds {
    fn default() -> Self {
        Self {
            low: DEFAULT_LOW_THRESHOLD,
            high: DEFAULT_HIGH_THRESHOLD,
        }
    }
}

/// Convert a grid to single-channel intensity.
pub fn to_intensity(grid: PixelGrid) -> GrayImage {
    match grid {
        PixelGrid::Gray(img) => img,
        PixelGrid::Rgb(img) => imageops::grayscale(&img),
    }
}

/// Detect edges. The result has the input's dimensions; pixels are 0 or 255.
pub fn detect_edges(grid: PixelGrid, thresholds: EdgeThresholds) -> GrayImage {
    let (width, height) = (grid.width(), grid.height());
    if width == 0 || height == 0 {
        debug!(width, height, "Empty image, skipping edge detection");
        return GrayImage::new(width, height);
    }

    debug!(
        width,
        height,
        low = thresholds.low,
        high = thresholds.high,
        "Running Canny edge detection"
    );
    let gray = to_intensity(grid);
    imageproc::edges::canny(&gray, thresholds.low, thresholds.high)
}
