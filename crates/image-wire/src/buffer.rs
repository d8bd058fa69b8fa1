//! Protobuf messages exchanged between client and service.
//!
//! Field tags are part of the wire contract and must not change.

use crate::{IMAGE_BYTE_DEPTH, NUM_COLOR_CHANNELS, NUM_GRAY_CHANNELS, WireError};

/// A raster image packed for transport.
///
/// `data` is row-major and channel-interleaved (`R,G,B,R,G,B,...` for color),
/// one byte per channel, and must hold exactly `width * height * channels`
/// bytes.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct ImageBuffer {
    /// `true` for 3-channel RGB, `false` for 1-channel grayscale.
    #[prost(bool, tag = "1")]
    pub color: bool,
    #[prost(bytes = "vec", tag = "2")]
    pub data: Vec<u8>,
    #[prost(uint32, tag = "3")]
    pub width: u32,
    #[prost(uint32, tag = "4")]
    pub height: u32,
}

impl ImageBuffer {
    pub fn new(color: bool, width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            color,
            data,
            width,
            height,
        }
    }

    /// Number of channels per pixel implied by the color flag.
    pub fn channels(&self) -> u64 {
        if self.color {
            NUM_COLOR_CHANNELS
        } else {
            NUM_GRAY_CHANNELS
        }
    }

    /// Byte count the declared dimensions require.
    pub fn expected_len(&self) -> u64 {
        u64::from(self.width)
            .saturating_mul(u64::from(self.height))
            .saturating_mul(self.channels())
            .saturating_mul(IMAGE_BYTE_DEPTH)
    }

    /// Check the byte length against the declared dimensions.
    pub fn check_len(&self) -> Result<(), WireError> {
        let actual = self.data.len() as u64;
        let expected = self.expected_len();
        if actual != expected {
            return Err(WireError::MalformedImage { actual, expected });
        }
        Ok(())
    }
}

/// Rotation amount in counterclockwise quarter turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum Rotation {
    Deg0 = 0,
    Deg90 = 1,
    Deg180 = 2,
    Deg270 = 3,
}

impl Rotation {
    /// Map a degree value (multiple of 90, any sign) to a rotation.
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        if degrees % 90 != 0 {
            return None;
        }
        Self::try_from((degrees / 90).rem_euclid(4)).ok()
    }

    pub fn degrees(self) -> u32 {
        self as u32 * 90
    }
}

/// Rotate `image` by `rotation` quarter turns.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RotationRequest {
    #[prost(message, optional, tag = "1")]
    pub image: Option<ImageBuffer>,
    #[prost(enumeration = "Rotation", tag = "2")]
    pub rotation: i32,
}

impl RotationRequest {
    pub fn new(image: ImageBuffer, rotation: Rotation) -> Self {
        Self {
            image: Some(image),
            rotation: rotation.into(),
        }
    }

    /// Quarter-turn count folded into `0..4`.
    ///
    /// Out-of-range wire values are reduced modulo 4 instead of rejected.
    pub fn quarter_turns(&self) -> u8 {
        self.rotation.rem_euclid(4) as u8
    }
}

/// Run edge detection on `image`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EdgeDetectionRequest {
    #[prost(message, optional, tag = "1")]
    pub image: Option<ImageBuffer>,
}

impl EdgeDetectionRequest {
    pub fn new(image: ImageBuffer) -> Self {
        Self { image: Some(image) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn expected_len_counts_channels() {
        assert_eq!(ImageBuffer::new(true, 4, 2, vec![]).expected_len(), 24);
        assert_eq!(ImageBuffer::new(false, 4, 2, vec![]).expected_len(), 8);
        assert_eq!(ImageBuffer::new(true, 0, 7, vec![]).expected_len(), 0);
    }

    #[test]
    fn expected_len_saturates_instead_of_overflowing() {
        let img = ImageBuffer::new(true, u32::MAX, u32::MAX, vec![]);
        assert_eq!(img.expected_len(), u64::MAX);
    }

    #[test]
    fn check_len_reports_actual_and_expected() {
        let img = ImageBuffer::new(false, 4, 2, vec![0; 7]);
        assert_eq!(
            img.check_len(),
            Err(WireError::MalformedImage {
                actual: 7,
                expected: 8
            })
        );
    }

    #[test]
    fn rotation_from_degrees() {
        assert_eq!(Rotation::from_degrees(0), Some(Rotation::Deg0));
        assert_eq!(Rotation::from_degrees(90), Some(Rotation::Deg90));
        assert_eq!(Rotation::from_degrees(180), Some(Rotation::Deg180));
        assert_eq!(Rotation::from_degrees(270), Some(Rotation::Deg270));
        assert_eq!(Rotation::from_degrees(360), Some(Rotation::Deg0));
        assert_eq!(Rotation::from_degrees(-90), Some(Rotation::Deg270));
        assert_eq!(Rotation::from_degrees(45), None);
    }

    #[test]
    fn rotation_degrees() {
        assert_eq!(Rotation::Deg0.degrees(), 0);
        assert_eq!(Rotation::Deg270.degrees(), 270);
        for degrees in [0, 90, 180, 270] {
            let rotation = Rotation::from_degrees(degrees);
            assert_eq!(rotation.map(Rotation::degrees), Some(degrees as u32));
        }
    }

    #[test]
    fn quarter_turns_folds_out_of_range_values() {
        let mut req = RotationRequest::new(ImageBuffer::default(), Rotation::Deg180);
        assert_eq!(req.quarter_turns(), 2);
        req.rotation = 5;
        assert_eq!(req.quarter_turns(), 1);
        req.rotation = -1;
        assert_eq!(req.quarter_turns(), 3);
    }

    #[test]
    fn missing_image_decodes_as_none() {
        let bytes = EdgeDetectionRequest { image: None }.encode_to_vec();
        let decoded = EdgeDetectionRequest::decode(bytes.as_slice()).unwrap();
        assert!(decoded.image.is_none());
        assert_eq!(decoded.image.unwrap_or_default().check_len(), Ok(()));
    }

    #[test]
    fn rotation_request_survives_the_wire() {
        let req = RotationRequest::new(
            ImageBuffer::new(false, 2, 1, vec![7, 9]),
            Rotation::Deg270,
        );
        let decoded = RotationRequest::decode(req.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded, req);
        assert_eq!(decoded.quarter_turns(), 3);
    }
}
