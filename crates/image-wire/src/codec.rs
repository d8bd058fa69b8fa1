//! Conversion between local pixel grids and wire buffers.
//!
//! The wire format is always RGB. Local grids may come in BGR order (the
//! usual layout of on-disk decoders built around OpenCV-style buffers); the
//! codec swaps red and blue at the boundary so that encode and decode are
//! exact inverses.

use image::DynamicImage;

use crate::validate::{PixelGrid, validate};
use crate::{ImageBuffer, WireError};

/// Channel order of a local interleaved pixel grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Bgr,
}

/// Pack a local interleaved grid into a wire buffer.
///
/// `pixels` must hold `width * height * channels` bytes in `order`.
pub fn encode_pixels(
    width: u32,
    height: u32,
    color: bool,
    mut pixels: Vec<u8>,
    order: ChannelOrder,
) -> Result<ImageBuffer, WireError> {
    if color && order == ChannelOrder::Bgr {
        swap_red_blue(&mut pixels);
    }
    let image = ImageBuffer::new(color, width, height, pixels);
    image.check_len()?;
    Ok(image)
}

/// Unpack a wire buffer into a local interleaved grid in `order`.
pub fn decode_pixels(image: ImageBuffer, order: ChannelOrder) -> Result<Vec<u8>, WireError> {
    image.check_len()?;
    let color = image.color;
    let mut pixels = image.data;
    if color && order == ChannelOrder::Bgr {
        swap_red_blue(&mut pixels);
    }
    Ok(pixels)
}

/// Pack a decoded image. With `color == false` the image is reduced to luma.
pub fn encode_image(img: &DynamicImage, color: bool) -> ImageBuffer {
    let grid: PixelGrid = if color {
        img.to_rgb8().into()
    } else {
        img.to_luma8().into()
    };
    grid.into_buffer()
}

/// Unpack a wire buffer into an 8-bit image ready for writing to disk.
pub fn decode_image(image: ImageBuffer) -> Result<DynamicImage, WireError> {
    Ok(match validate(image)? {
        PixelGrid::Gray(img) => DynamicImage::ImageLuma8(img),
        PixelGrid::Rgb(img) => DynamicImage::ImageRgb8(img),
    })
}

fn swap_red_blue(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(3) {
        px.swap(0, 2);
    }
}
