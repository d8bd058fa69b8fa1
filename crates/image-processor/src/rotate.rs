//! Quarter-turn image rotation.
//!
//! Rotation is counterclockwise in the row/column plane; the channel axis of
//! color images is carried along untouched.

use image::{ImageBuffer, Pixel, imageops};
use image_wire::PixelGrid;
use tracing::debug;

/// Rotate a grid by `quarter_turns` x 90 degrees counterclockwise.
///
/// The count is taken modulo 4. Odd counts swap width and height.
pub fn rotate(grid: PixelGrid, quarter_turns: u8) -> PixelGrid {
    let k = quarter_turns % 4;
    let (w, h) = (grid.width(), grid.height());
    debug!(w, h, degrees = u32::from(k) * 90, "Rotating image");

    match grid {
        PixelGrid::Gray(img) => PixelGrid::Gray(turn_ccw(img, k)),
        PixelGrid::Rgb(img) => PixelGrid::Rgb(turn_ccw(img, k)),
    }
}

fn turn_ccw<P>(img: ImageBuffer<P, Vec<P::Subpixel>>, k: u8) -> ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel + 'static,
{
    // imageops rotates clockwise
    match k {
        1 => imageops::rotate270(&img),
        2 => imageops::rotate180(&img),
        3 => imageops::rotate90(&img),
        _ => img,
    }
}
