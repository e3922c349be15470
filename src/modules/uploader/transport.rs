use async_trait::async_trait;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

use crate::features::auth::dtos::LoginResponseDto;
use crate::features::gallery::dtos::{GalleryImageResponseDto, PresignUploadResponseDto};
use crate::features::gallery::models::Category;
use crate::modules::uploader::progress::ProgressTracker;
use crate::shared::types::ApiResponse;

/// Trickle cadence while a PUT is in flight without real progress
const TRICKLE_INTERVAL_MS: u64 = 500;
/// Chunk size for the streamed PUT body
const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// Errors raised by the upload flow.
///
/// `Transfer` failures are retried by the orchestrator; everything else is
/// terminal and aborts the submission.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Failed to prepare upload: {0}")]
    Presign(String),

    #[error("Upload failed: {0}")]
    Transfer(String),

    #[error("Failed to create gallery record: {0}")]
    Create(String),

    #[error("Invalid submission: {0}")]
    Invalid(String),
}

/// Wire payload for the record-creation call
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGalleryRequest {
    pub title: String,
    pub category: Category,
    pub keywords: Vec<String>,
    pub image_keys: Vec<String>,
}

/// Transport seam for the orchestrator.
///
/// `put` reports progress percentages (0-100) through the callback as bytes
/// move; implementations without byte-level visibility may report nothing and
/// rely on the orchestrator-side trickle.
#[async_trait]
pub trait UploadTransport: Send + Sync {
    async fn presign(
        &self,
        filename: &str,
        content_type: &str,
    ) -> Result<PresignUploadResponseDto, UploadError>;

    async fn put(
        &self,
        upload_url: &str,
        content_type: &str,
        data: Vec<u8>,
        progress: &(dyn Fn(u8) + Send + Sync),
    ) -> Result<(), UploadError>;

    async fn create_item(
        &self,
        request: CreateGalleryRequest,
    ) -> Result<GalleryImageResponseDto, UploadError>;
}

/// HTTP transport driving the real API: login once, then presign and create
/// with the bearer token, PUT straight to object storage.
pub struct ApiTransport {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl ApiTransport {
    /// Log in with the shared admin password and build an authenticated
    /// transport.
    pub async fn login(base_url: &str, password: &str) -> Result<Self, UploadError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| UploadError::Invalid(format!("Failed to build HTTP client: {}", e)))?;

        let response = client
            .post(format!("{}/api/admin/login", base_url))
            .json(&serde_json::json!({ "password": password }))
            .send()
            .await
            .map_err(|e| UploadError::Transfer(format!("Login request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(UploadError::Invalid(format!(
                "Login rejected: HTTP {}",
                response.status()
            )));
        }

        let body: ApiResponse<LoginResponseDto> = response
            .json()
            .await
            .map_err(|e| UploadError::Invalid(format!("Failed to parse login response: {}", e)))?;

        let token = body
            .data
            .ok_or_else(|| UploadError::Invalid("Login response carried no token".to_string()))?
            .token;

        Ok(Self {
            base_url,
            token,
            client,
        })
    }
}

#[async_trait]
impl UploadTransport for ApiTransport {
    async fn presign(
        &self,
        filename: &str,
        content_type: &str,
    ) -> Result<PresignUploadResponseDto, UploadError> {
        let response = self
            .client
            .post(format!("{}/api/gallery/presign-upload", self.base_url))
            .bearer_auth(&self.token)
            .json(&serde_json::json!({
                "filename": filename,
                "contentType": content_type,
            }))
            .send()
            .await
            .map_err(|e| UploadError::Presign(format!("Presign request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(UploadError::Presign(format!(
                "Presign rejected: HTTP {}",
                response.status()
            )));
        }

        let body: ApiResponse<PresignUploadResponseDto> = response.json().await.map_err(|e| {
            UploadError::Presign(format!("Failed to parse presign response: {}", e))
        })?;

        body.data
            .ok_or_else(|| UploadError::Presign("Invalid presign response".to_string()))
    }

    async fn put(
        &self,
        upload_url: &str,
        content_type: &str,
        data: Vec<u8>,
        progress: &(dyn Fn(u8) + Send + Sync),
    ) -> Result<(), UploadError> {
        let total = data.len() as u64;
        let mut tracker = ProgressTracker::new();
        progress(tracker.start());

        // The body stream reports cumulative bytes through a channel as
        // chunks are pulled; the select loop below folds those signals and
        // the trickle into the progress callback.
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<u64>();
        let mut sent: u64 = 0;
        let chunks: Vec<Vec<u8>> = data.chunks(UPLOAD_CHUNK_SIZE).map(|c| c.to_vec()).collect();
        let stream = futures::stream::iter(chunks.into_iter().map(move |chunk| {
            sent += chunk.len() as u64;
            let _ = tx.send(sent);
            Ok::<Vec<u8>, std::io::Error>(chunk)
        }));

        let send_fut = self
            .client
            .put(upload_url)
            .header(CONTENT_TYPE, content_type)
            .header(CONTENT_LENGTH, total)
            .body(reqwest::Body::wrap_stream(stream))
            .send();
        tokio::pin!(send_fut);

        let mut interval =
            tokio::time::interval(Duration::from_millis(TRICKLE_INTERVAL_MS));
        let mut channel_open = true;

        let response = loop {
            tokio::select! {
                result = &mut send_fut => break result,
                signal = rx.recv(), if channel_open => {
                    match signal {
                        Some(bytes_sent) => {
                            if let Some(percent) = tracker.on_bytes(bytes_sent, total) {
                                progress(percent);
                            }
                        }
                        // Stream fully consumed; stop polling the channel.
                        None => channel_open = false,
                    }
                }
                _ = interval.tick() => {
                    if let Some(percent) = tracker.tick() {
                        progress(percent);
                    }
                }
            }
        };

        let response = response
            .map_err(|e| UploadError::Transfer(format!("Network error during upload: {}", e)))?;

        if !response.status().is_success() {
            return Err(UploadError::Transfer(format!(
                "Upload target rejected the file: HTTP {}",
                response.status()
            )));
        }

        progress(tracker.complete());
        Ok(())
    }

    async fn create_item(
        &self,
        request: CreateGalleryRequest,
    ) -> Result<GalleryImageResponseDto, UploadError> {
        let response = self
            .client
            .post(format!("{}/api/gallery", self.base_url))
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await
            .map_err(|e| UploadError::Create(format!("Create request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(UploadError::Create(format!(
                "Create rejected: HTTP {}",
                response.status()
            )));
        }

        let body: ApiResponse<GalleryImageResponseDto> = response
            .json()
            .await
            .map_err(|e| UploadError::Create(format!("Failed to parse create response: {}", e)))?;

        body.data
            .ok_or_else(|| UploadError::Create("Create response carried no record".to_string()))
    }
}
