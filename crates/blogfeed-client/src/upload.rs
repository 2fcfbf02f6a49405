//! Media upload adapter (Cloudinary unsigned uploads).

use std::future::Future;
use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::UploadConfig;
use crate::errors::{FeedError, FeedResult};

/// A user-selected image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), bytes }
    }

    pub async fn read(path: &Path) -> FeedResult<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| FeedError::Upload(format!("cannot read {}: {e}", path.display())))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self { file_name, bytes })
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Mime type guessed from the extension.
    pub fn mime_type(&self) -> &'static str {
        let ext = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "svg" => "image/svg+xml",
            _ => "application/octet-stream",
        }
    }
}

pub trait MediaHost: Send + Sync {
    /// Upload `file` and return its public HTTPS URL.
    fn upload(&self, file: ImageFile) -> impl Future<Output = FeedResult<String>> + Send;
}

#[derive(Debug, Clone)]
pub struct CloudinaryUploader {
    http: reqwest::Client,
    config: UploadConfig,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    secure_url: Option<String>,
}

impl CloudinaryUploader {
    pub fn new(config: UploadConfig) -> FeedResult<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FeedError::Config(format!("http client: {e}")))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    fn form(&self, file: ImageFile) -> FeedResult<Form> {
        let mime = file.mime_type();
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(mime)
            .map_err(|e| FeedError::Upload(e.to_string()))?;
        Ok(Form::new()
            .part("file", part)
            .text("upload_preset", self.config.upload_preset.clone())
            .text("cloud_name", self.config.cloud_name.clone()))
    }
}

impl MediaHost for CloudinaryUploader {
    async fn upload(&self, file: ImageFile) -> FeedResult<String> {
        if file.is_empty() {
            return Err(FeedError::Upload(format!("{} is empty", file.file_name)));
        }
        let endpoint = self.config.endpoint();
        debug!(%endpoint, file = %file.file_name, bytes = file.bytes.len(), "uploading image");

        let resp = self
            .http
            .post(&endpoint)
            .multipart(self.form(file)?)
            .send()
            .await
            .map_err(|e| FeedError::Upload(e.to_string()))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| FeedError::Upload(e.to_string()))?;

        let url = parse_upload_response(status, &body)?;
        info!(%url, "image uploaded");
        Ok(url)
    }
}

/// Extract `secure_url` from a media host response.
pub fn parse_upload_response(status: StatusCode, body: &str) -> FeedResult<String> {
    if !status.is_success() {
        let snippet: String = body.chars().take(200).collect();
        return Err(FeedError::Upload(format!("http error: {status}: {snippet}")));
    }
    let parsed: UploadResponse = serde_json::from_str(body)
        .map_err(|e| FeedError::Upload(format!("invalid response: {e}")))?;
    match parsed.secure_url {
        Some(url) if !url.trim().is_empty() => Ok(url),
        _ => Err(FeedError::Upload("response has no secure_url".to_string())),
    }
}
