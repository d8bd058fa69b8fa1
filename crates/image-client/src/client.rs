//! HTTP client for the two transform calls.

use std::path::{Path, PathBuf};

use image_wire::{
    CONTENT_TYPE, EDGE_DETECTION_PATH, EdgeDetectionRequest, ImageBuffer, ROTATE_IMAGE_PATH,
    Rotation, RotationRequest,
};
use prost::Message;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE as CONTENT_TYPE_HEADER};
use serde::Deserialize;

use crate::ClientError;
use crate::files::{self, output_path};

/// Error payload returned by the service.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    kind: String,
    #[serde(default)]
    expected: Option<u64>,
    #[serde(default)]
    actual: Option<u64>,
}

/// Files written by [`ImageServiceClient::transform_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedFiles {
    pub rotated: PathBuf,
    pub edges: PathBuf,
}

/// Remote image transform service.
#[derive(Debug, Clone)]
pub struct ImageServiceClient {
    http: reqwest::Client,
    base_url: String,
}

impl ImageServiceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `RotateImage` call.
    pub async fn rotate_image(&self, request: &RotationRequest) -> Result<ImageBuffer, ClientError> {
        self.call(ROTATE_IMAGE_PATH, request).await
    }

    /// `EdgeDetection` call.
    pub async fn edge_detection(
        &self,
        request: &EdgeDetectionRequest,
    ) -> Result<ImageBuffer, ClientError> {
        self.call(EDGE_DETECTION_PATH, request).await
    }

    /// Rotate and edge-detect one local file, writing both results next to it.
    pub async fn transform_file(
        &self,
        path: &Path,
        rotation: Rotation,
        color: bool,
    ) -> Result<TransformedFiles, ClientError> {
        let image = files::read_image(path, color)?;

        let rotated = self
            .rotate_image(&RotationRequest::new(image.clone(), rotation))
            .await?;
        let rotated_path = output_path(path, "rotated");
        files::write_image(rotated, &rotated_path)?;
        tracing::info!(path = %rotated_path.display(), "Wrote rotated image");

        let edges = self
            .edge_detection(&EdgeDetectionRequest::new(image))
            .await?;
        let edges_path = output_path(path, "edges");
        files::write_image(edges, &edges_path)?;
        tracing::info!(path = %edges_path.display(), "Wrote edge map");

        Ok(TransformedFiles {
            rotated: rotated_path,
            edges: edges_path,
        })
    }

    async fn call(&self, route: &str, request: &impl Message) -> Result<ImageBuffer, ClientError> {
        let url = format!("{}{}", self.base_url, route);
        let resp = self
            .http
            .post(&url)
            .header(CONTENT_TYPE_HEADER, CONTENT_TYPE)
            .header(ACCEPT, CONTENT_TYPE)
            .body(request.encode_to_vec())
            .send()
            .await?;

        let status = resp.status();
        let body = resp.bytes().await?;

        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "Image service call failed");
            return Err(error_from_response(status, &body));
        }

        Ok(ImageBuffer::decode(body)?)
    }
}

fn error_from_response(status: StatusCode, body: &[u8]) -> ClientError {
    let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_else(|_| ErrorBody {
        error: String::from_utf8_lossy(body).into_owned(),
        ..ErrorBody::default()
    });

    match (status, parsed.kind.as_str(), parsed.actual, parsed.expected) {
        (StatusCode::UNPROCESSABLE_ENTITY, "malformed_image", Some(actual), Some(expected)) => {
            ClientError::MalformedImage { actual, expected }
        }
        (StatusCode::SERVICE_UNAVAILABLE, ..) => ClientError::Overloaded(parsed.error),
        _ => ClientError::Api {
            status: status.as_u16(),
            message: parsed.error,
        },
    }
}
