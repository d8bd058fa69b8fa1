//! Client for the image transform service.
//!
//! Provides the remote calls (`RotateImage`, `EdgeDetection`) over HTTP and
//! the local file boundary used by the command-line client.

pub mod client;
pub mod files;

pub use client::{ImageServiceClient, TransformedFiles};
pub use files::{ALLOWED_EXTENSIONS, FileError, output_path, read_image, write_image};

/// Default service address for local deployments.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:50051";

/// Unified error type for the image-client crate.
///
/// Failures reported by the service (`MalformedImage`, `Overloaded`, `Api`)
/// stay distinct from failures to reach it (`Transport`).
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Malformed image: data has {actual} bytes, expected {expected}")]
    MalformedImage { actual: u64, expected: u64 },

    #[error("Service overloaded: {0}")]
    Overloaded(String),

    #[error("Service error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error(transparent)]
    File(#[from] FileError),
}

impl ClientError {
    /// Whether repeating the same call can succeed.
    ///
    /// A malformed image will be rejected again until it is re-encoded.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Overloaded(_))
    }
}
