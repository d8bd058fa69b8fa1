//! Buffer validation and reshaping into pixel grids.

use image::{GrayImage, RgbImage};
use tracing::{debug, warn};

use crate::{ImageBuffer, WireError};

/// A validated image, reshaped to `height x width[ x 3]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelGrid {
    Gray(GrayImage),
    Rgb(RgbImage),
}

impl PixelGrid {
    pub fn width(&self) -> u32 {
        match self {
            Self::Gray(img) => img.width(),
            Self::Rgb(img) => img.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Self::Gray(img) => img.height(),
            Self::Rgb(img) => img.height(),
        }
    }

    pub fn is_color(&self) -> bool {
        matches!(self, Self::Rgb(_))
    }

    /// Flatten back into a wire buffer (row-major, channel-interleaved).
    pub fn into_buffer(self) -> ImageBuffer {
        let (width, height) = (self.width(), self.height());
        match self {
            Self::Gray(img) => ImageBuffer::new(false, width, height, img.into_raw()),
            Self::Rgb(img) => ImageBuffer::new(true, width, height, img.into_raw()),
        }
    }
}

impl From<GrayImage> for PixelGrid {
    fn from(img: GrayImage) -> Self {
        Self::Gray(img)
    }
}

impl From<RgbImage> for PixelGrid {
    fn from(img: RgbImage) -> Self {
        Self::Rgb(img)
    }
}

/// Validate a received buffer and reshape it into a pixel grid.
///
/// Fails with [`WireError::MalformedImage`] when the byte count does not match
/// `width * height * channels`.
pub fn validate(image: ImageBuffer) -> Result<PixelGrid, WireError> {
    if let Err(e) = image.check_len() {
        warn!(
            width = image.width,
            height = image.height,
            color = image.color,
            error = %e,
            "Rejecting malformed image"
        );
        return Err(e);
    }

    let actual = image.data.len() as u64;
    let expected = image.expected_len();
    let ImageBuffer {
        color,
        data,
        width,
        height,
    } = image;
    debug!(width, height, color, "Image buffer validated");

    let grid = if color {
        RgbImage::from_raw(width, height, data).map(PixelGrid::Rgb)
    } else {
        GrayImage::from_raw(width, height, data).map(PixelGrid::Gray)
    };
    // Only reachable when the dimensions overflow the address space.
    grid.ok_or(WireError::MalformedImage { actual, expected })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_exact_length() {
        for color in [false, true] {
            for width in 0..5u32 {
                for height in 0..5u32 {
                    let channels = if color { 3 } else { 1 };
                    let len = (width * height * channels) as usize;
                    let grid = validate(ImageBuffer::new(color, width, height, vec![1; len]))
                        .expect("exact length must validate");
                    assert_eq!(grid.width(), width);
                    assert_eq!(grid.height(), height);
                    assert_eq!(grid.is_color(), color);
                }
            }
        }
    }

    #[test]
    fn rejects_every_other_length_with_expected_count() {
        for color in [false, true] {
            let channels = if color { 3 } else { 1 };
            let expected = 3 * 2 * channels;
            for len in (0..expected + 4).filter(|&l| l != expected) {
                let err = validate(ImageBuffer::new(color, 3, 2, vec![0; len as usize]))
                    .unwrap_err();
                assert_eq!(
                    err,
                    WireError::MalformedImage {
                        actual: len,
                        expected
                    }
                );
            }
        }
    }

    #[test]
    fn gray_image_one_byte_short() {
        let err = validate(ImageBuffer::new(false, 4, 2, vec![0; 7])).unwrap_err();
        assert_eq!(
            err,
            WireError::MalformedImage {
                actual: 7,
                expected: 8
            }
        );
        assert_eq!(err.to_string(), "Image data has 7 bytes, expected 8");
    }

    #[test]
    fn reshape_is_row_major_and_interleaved() {
        // 2x2 RGB: pixel (x, y) has red = 10 * y + x
        let data = vec![0, 1, 2, 1, 1, 2, 10, 1, 2, 11, 1, 2];
        let PixelGrid::Rgb(img) = validate(ImageBuffer::new(true, 2, 2, data)).unwrap() else {
            panic!("expected RGB grid");
        };
        assert_eq!(img.get_pixel(1, 0).0, [1, 1, 2]);
        assert_eq!(img.get_pixel(0, 1).0, [10, 1, 2]);
        assert_eq!(img.get_pixel(1, 1).0, [11, 1, 2]);
    }

    #[test]
    fn into_buffer_restores_the_input() {
        let original = ImageBuffer::new(false, 3, 2, vec![1, 2, 3, 4, 5, 6]);
        let grid = validate(original.clone()).unwrap();
        assert_eq!(grid.into_buffer(), original);
    }

    #[test]
    fn grids_convert_from_image_buffers() {
        let gray: PixelGrid = GrayImage::new(3, 2).into();
        assert!(!gray.is_color());
        let rgb: PixelGrid = RgbImage::new(3, 2).into();
        assert!(rgb.is_color());
        assert_eq!((rgb.width(), rgb.height()), (3, 2));
    }
}
