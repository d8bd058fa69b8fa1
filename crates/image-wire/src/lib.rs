//! Image wire-format contract shared by the transform service and its clients.
//!
//! An image travels as a flat, row-major, channel-interleaved byte buffer with
//! a color flag and its dimensions. Every buffer is validated against those
//! dimensions before it is reshaped into a pixel grid.

pub mod buffer;
pub mod codec;
pub mod validate;

// Re-exports for convenience
pub use buffer::{EdgeDetectionRequest, ImageBuffer, RotationRequest, Rotation};
pub use codec::{ChannelOrder, decode_image, decode_pixels, encode_image, encode_pixels};
pub use validate::{PixelGrid, validate};

/// Bytes per channel. Only 8-bit images are supported.
pub const IMAGE_BYTE_DEPTH: u64 = 1;

/// Channels per pixel for color (RGB) images.
pub const NUM_COLOR_CHANNELS: u64 = 3;

/// Channels per pixel for grayscale images.
pub const NUM_GRAY_CHANNELS: u64 = 1;

/// Protobuf content type used on the transport.
pub const CONTENT_TYPE: &str = "application/x-protobuf";

/// Transport route for `RotateImage`.
pub const ROTATE_IMAGE_PATH: &str = "/rpc/rotate-image";

/// Transport route for `EdgeDetection`.
pub const EDGE_DETECTION_PATH: &str = "/rpc/edge-detection";

/// Errors raised while checking a buffer against the wire contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    #[error("Image data has {actual} bytes, expected {expected}")]
    MalformedImage { actual: u64, expected: u64 },
}
