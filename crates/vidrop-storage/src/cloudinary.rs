//! Cloudinary video storage
//!
//! Uploads go through the signed upload API
//! (`POST {base}/v1_1/{cloud_name}/video/upload`) as a multipart form.

use crate::naming::{public_id, unix_millis};
use crate::traits::{StorageError, StorageResult, StoredVideo, VideoStorage, VideoUpload};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use vidrop_core::models::StoredLocation;
use vidrop_core::Config;

/// Size of the chunks the in-memory buffer is streamed in
const UPLOAD_CHUNK_SIZE: usize = 1024 * 1024;

/// Connection settings for a Cloudinary account
#[derive(Clone, Debug)]
pub struct CloudinarySettings {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub api_base_url: String,
    pub upload_folder: String,
    pub timeout: Option<Duration>,
}

impl CloudinarySettings {
    pub fn from_config(config: &Config) -> StorageResult<Self> {
        let required = |value: Option<&str>, name: &str| {
            value
                .map(String::from)
                .ok_or_else(|| StorageError::ConfigError(format!("{} not configured", name)))
        };

        Ok(Self {
            cloud_name: required(config.cloudinary_cloud_name(), "CLOUDINARY_CLOUD_NAME")?,
            api_key: required(config.cloudinary_api_key(), "CLOUDINARY_API_KEY")?,
            api_secret: required(config.cloudinary_api_secret(), "CLOUDINARY_API_SECRET")?,
            api_base_url: config.cloudinary_api_base_url().to_string(),
            upload_folder: config.cloudinary_upload_folder().to_string(),
            timeout: config.cloudinary_timeout_secs().map(Duration::from_secs),
        })
    }
}

/// Options sent with an upload request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadOptions {
    pub public_id: String,
    pub overwrite: bool,
    pub resource_type: String,
}

impl UploadOptions {
    pub fn video(public_id: impl Into<String>) -> Self {
        Self {
            public_id: public_id.into(),
            overwrite: true,
            resource_type: "video".to_string(),
        }
    }
}

/// Fields of the upload API response we care about
#[derive(Debug, Clone, Deserialize)]
pub struct CloudinaryUploadResult {
    pub secure_url: String,
    #[serde(default)]
    pub public_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub bytes: Option<u64>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub version: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct CloudinaryErrorBody {
    error: CloudinaryErrorDetail,
}

#[derive(Debug, Deserialize)]
struct CloudinaryErrorDetail {
    message: String,
}

/// Sign request parameters: `sha256(sorted "k=v" pairs joined by '&' + secret)`, hex encoded.
pub fn sign(params: &BTreeMap<&str, String>, api_secret: &str) -> String {
    let to_sign = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Cloudinary storage implementation
#[derive(Clone)]
pub struct CloudinaryStorage {
    http_client: reqwest::Client,
    settings: CloudinarySettings,
}

impl CloudinaryStorage {
    pub fn new(settings: CloudinarySettings) -> StorageResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(|e| {
            StorageError::ConfigError(format!("Failed to create HTTP client for Cloudinary: {}", e))
        })?;

        tracing::info!(
            cloud_name = %settings.cloud_name,
            upload_folder = %settings.upload_folder,
            "Cloudinary storage initialized"
        );

        Ok(Self {
            http_client,
            settings,
        })
    }

    fn upload_url(&self, resource_type: &str) -> String {
        format!(
            "{}/v1_1/{}/{}/upload",
            self.settings.api_base_url.trim_end_matches('/'),
            self.settings.cloud_name,
            resource_type
        )
    }

    /// Upload an in-memory buffer, streaming it to the API in chunks
    pub async fn upload_buffer(
        &self,
        data: Bytes,
        filename: &str,
        options: UploadOptions,
    ) -> StorageResult<CloudinaryUploadResult> {
        let timestamp = chrono::Utc::now().timestamp().to_string();

        let mut params = BTreeMap::new();
        params.insert("overwrite", options.overwrite.to_string());
        params.insert("public_id", options.public_id.clone());
        params.insert("timestamp", timestamp);
        let signature = sign(&params, &self.settings.api_secret);

        let length = data.len() as u64;
        let chunks: Vec<Result<Bytes, std::io::Error>> = (0..data.len())
            .step_by(UPLOAD_CHUNK_SIZE)
            .map(|start| Ok(data.slice(start..(start + UPLOAD_CHUNK_SIZE).min(data.len()))))
            .collect();
        let body = reqwest::Body::wrap_stream(futures::stream::iter(chunks));
        let file_part = Part::stream_with_length(body, length).file_name(filename.to_string());

        let mut form = Form::new()
            .part("file", file_part)
            .text("api_key", self.settings.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");
        for (key, value) in params {
            form = form.text(key, value);
        }

        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(self.upload_url(&options.resource_type))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                StorageError::UploadFailed(format!("Failed to send request to Cloudinary: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = serde_json::from_str::<CloudinaryErrorBody>(&error_text)
                .map(|body| body.error.message)
                .unwrap_or_else(|_| format!("Cloudinary upload failed: {} - {}", status, error_text));

            tracing::error!(
                status = %status,
                public_id = %options.public_id,
                error = %message,
                "Cloudinary upload rejected"
            );
            return Err(StorageError::Remote(message));
        }

        let result: CloudinaryUploadResult = response.json().await.map_err(|e| {
            StorageError::BackendError(format!("Failed to parse Cloudinary response: {}", e))
        })?;

        tracing::info!(
            public_id = %options.public_id,
            secure_url = %result.secure_url,
            size_bytes = length,
            duration_ms = start.elapsed().as_millis(),
            "Cloudinary upload successful"
        );

        Ok(result)
    }
}

#[async_trait]
impl VideoStorage for CloudinaryStorage {
    async fn store(&self, mut upload: VideoUpload<'_>) -> StorageResult<StoredVideo> {
        let mut data = Vec::new();
        upload
            .body
            .read_to_end(&mut data)
            .await
            .map_err(StorageError::BodyRead)?;
        let size_bytes = data.len() as u64;

        let public_id = public_id(
            &self.settings.upload_folder,
            &upload.original_name,
            unix_millis(),
        );

        let result = self
            .upload_buffer(
                Bytes::from(data),
                &upload.original_name,
                UploadOptions::video(public_id),
            )
            .await?;

        Ok(StoredVideo {
            location: StoredLocation::Remote {
                url: result.secure_url,
            },
            size_bytes,
        })
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Cloudinary
    }
}
