//! Reqwest-backed Cloudinary avatar store.
//!
//! Performs a signed multipart upload against the Cloudinary image upload
//! endpoint and returns the `secure_url` from the response. Signatures are
//! SHA-256 hex digests of the sorted parameters followed by the API secret.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::domain::ports::{AvatarStore, AvatarStoreError, StoredAvatar};
use crate::domain::{AvatarFolder, AvatarUpload};

const DEFAULT_API_BASE: &str = "https://api.cloudinary.com/v1_1/";
const DEFAULT_FILE_NAME: &str = "avatar";

/// Account credentials for signed uploads.
#[derive(Clone)]
pub struct CloudinaryCredentials {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: Zeroizing<String>,
}

impl std::fmt::Debug for CloudinaryCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryCredentials")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Avatar store adapter that uploads to a single Cloudinary cloud.
pub struct CloudinaryAvatarStore {
    client: Client,
    endpoint: Url,
    credentials: CloudinaryCredentials,
    clock: Arc<dyn Clock>,
}

impl CloudinaryAvatarStore {
    /// Build an adapter for the public Cloudinary API.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed or the
    /// cloud name does not form a valid URL.
    pub fn new(
        credentials: CloudinaryCredentials,
        timeout: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CloudinaryConfigError> {
        let base = Url::parse(DEFAULT_API_BASE).map_err(CloudinaryConfigError::endpoint)?;
        Self::with_api_base(base, credentials, timeout, clock)
    }

    /// Build an adapter against an alternative API base, e.g. a local stub.
    ///
    /// # Errors
    ///
    /// See [`CloudinaryAvatarStore::new`].
    pub fn with_api_base(
        api_base: Url,
        credentials: CloudinaryCredentials,
        timeout: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CloudinaryConfigError> {
        let endpoint = upload_endpoint(&api_base, &credentials.cloud_name)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CloudinaryConfigError::Client)?;
        Ok(Self {
            client,
            endpoint,
            credentials,
            clock,
        })
    }
}

/// Failures building the Cloudinary adapter.
#[derive(Debug, thiserror::Error)]
pub enum CloudinaryConfigError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("invalid Cloudinary endpoint: {message}")]
    Endpoint { message: String },
}

impl CloudinaryConfigError {
    fn endpoint(error: impl std::fmt::Display) -> Self {
        Self::Endpoint {
            message: error.to_string(),
        }
    }
}

fn upload_endpoint(api_base: &Url, cloud_name: &str) -> Result<Url, CloudinaryConfigError> {
    let cloud = cloud_name.trim();
    if cloud.is_empty() || cloud.contains('/') {
        return Err(CloudinaryConfigError::endpoint(format!(
            "cloud name '{cloud_name}' is not a single path segment"
        )));
    }
    api_base
        .join(&format!("{cloud}/image/upload"))
        .map_err(CloudinaryConfigError::endpoint)
}

/// Sign the upload parameters: `key=value` pairs sorted by key, joined with
/// `&`, with the secret appended, hashed with SHA-256.
fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|left, right| left.0.cmp(right.0));
    let to_sign = sorted
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, Deserialize)]
struct UploadResponseDto {
    secure_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    error: ErrorDetailDto,
}

#[derive(Debug, Deserialize)]
struct ErrorDetailDto {
    message: String,
}

fn file_part(upload: &AvatarUpload) -> Result<Part, AvatarStoreError> {
    let part = Part::bytes(upload.bytes.to_vec()).file_name(
        upload
            .file_name
            .clone()
            .unwrap_or_else(|| DEFAULT_FILE_NAME.to_owned()),
    );
    match &upload.content_type {
        Some(content_type) => part.mime_str(content_type).map_err(|error| {
            AvatarStoreError::transport(format!("invalid avatar content type: {error}"))
        }),
        None => Ok(part),
    }
}

#[async_trait]
impl AvatarStore for CloudinaryAvatarStore {
    async fn upload(
        &self,
        folder: &AvatarFolder,
        upload: &AvatarUpload,
    ) -> Result<StoredAvatar, AvatarStoreError> {
        let timestamp = self.clock.utc().timestamp().to_string();
        let signature = sign(
            &[("folder", folder.as_str()), ("timestamp", &timestamp)],
            &self.credentials.api_secret,
        );

        let form = Form::new()
            .part("file", file_part(upload)?)
            .text("api_key", self.credentials.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder.as_str().to_owned())
            .text("signature", signature);

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_secure_url(body.as_ref())
    }
}

fn parse_secure_url(body: &[u8]) -> Result<StoredAvatar, AvatarStoreError> {
    let decoded: UploadResponseDto = serde_json::from_slice(body).map_err(|error| {
        AvatarStoreError::invalid_response(format!("invalid upload JSON payload: {error}"))
    })?;
    match decoded.secure_url {
        Some(secure_url) if !secure_url.is_empty() => Ok(StoredAvatar { secure_url }),
        _ => Err(AvatarStoreError::invalid_response(
            "upload response carried no secure_url",
        )),
    }
}

fn map_transport_error(error: reqwest::Error) -> AvatarStoreError {
    if error.is_timeout() {
        AvatarStoreError::transport(format!("request timed out: {error}"))
    } else {
        AvatarStoreError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> AvatarStoreError {
    let message = serde_json::from_slice::<ErrorResponseDto>(body)
        .map(|dto| dto.error.message)
        .unwrap_or_else(|_| body_preview(body));
    AvatarStoreError::rejected(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
