//! Image transforms served over the wire contract in `image-wire`.
//!
//! Provides quarter-turn rotation, Canny edge detection, and the
//! [`ImageTransformService`] trait tying them to validated requests.

pub mod edges;
pub mod rotate;
pub mod service;

// Re-exports for convenience
pub use edges::{EdgeThresholds, detect_edges};
pub use rotate::rotate;
pub use service::{ImageTransformService, Transformer};
