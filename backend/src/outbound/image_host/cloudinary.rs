//! Reqwest-backed Cloudinary image host adapter.
//!
//! Owns transport details only: request signing, multipart encoding, HTTP
//! status mapping, and reply decoding. One attempt per upload; callers decide
//! what a failure means.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode, Url};
use sha2::{Digest, Sha256};

use super::dto::{ErrorReplyDto, UploadReplyDto};
use crate::domain::ports::{ImageHost, ImageHostError, ImageUpload};

/// Public Cloudinary API root.
pub const DEFAULT_API_BASE: &str = "https://api.cloudinary.com";
const SIGNATURE_ALGORITHM: &str = "sha256";

/// Account credentials for signed uploads.
#[derive(Clone)]
pub struct CloudinaryCredentials {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl std::fmt::Debug for CloudinaryCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryCredentials")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"***")
            .finish()
    }
}

/// Image host adapter that uploads to one Cloudinary account.
pub struct CloudinaryImageHost {
    client: Client,
    endpoint: Url,
    credentials: CloudinaryCredentials,
    clock: Arc<dyn Clock>,
}

/// Errors raised while building the adapter.
#[derive(Debug, thiserror::Error)]
pub enum CloudinaryBuildError {
    #[error("invalid Cloudinary upload endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl CloudinaryImageHost {
    /// Build an adapter against the public API with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the endpoint or the reqwest client cannot be
    /// constructed.
    pub fn new(
        credentials: CloudinaryCredentials,
        timeout: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CloudinaryBuildError> {
        Self::with_api_base(DEFAULT_API_BASE, credentials, timeout, clock)
    }

    /// Build an adapter against an alternative API root.
    pub fn with_api_base(
        api_base: &str,
        credentials: CloudinaryCredentials,
        timeout: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CloudinaryBuildError> {
        let endpoint = upload_endpoint(api_base, &credentials.cloud_name)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            credentials,
            clock,
        })
    }

    /// Upload endpoint this adapter posts to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn upload_endpoint(api_base: &str, cloud_name: &str) -> Result<Url, url::ParseError> {
    let base = Url::parse(api_base)?;
    base.join(&format!("v1_1/{cloud_name}/image/upload"))
}

/// Hex SHA-256 over the sorted signed parameters followed by the secret.
fn sign_upload(timestamp: i64, api_secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("timestamp={timestamp}{api_secret}").as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl ImageHost for CloudinaryImageHost {
    async fn upload(&self, image: ImageUpload) -> Result<String, ImageHostError> {
        let timestamp = self.clock.utc().timestamp();
        let signature = sign_upload(timestamp, &self.credentials.api_secret);

        let ImageUpload {
            file_name,
            content_type,
            bytes,
        } = image;
        let part = Part::bytes(bytes).file_name(file_name);
        let part = match content_type.as_deref() {
            Some(mime) => part
                .mime_str(mime)
                .map_err(|err| ImageHostError::transport(format!("invalid content type: {err}")))?,
            None => part,
        };

        let form = Form::new()
            .text("api_key", self.credentials.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("signature", signature)
            .text("signature_algorithm", SIGNATURE_ALGORITHM)
            .part("file", part);

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

fn parse_secure_url(body: &[u8]) -> Result<String, ImageHostError> {
    let reply: UploadReplyDto = serde_json::from_slice(body).map_err(|error| {
        ImageHostError::decode(format!("invalid upload reply JSON: {error}"))
    })?;
    reply.into_secure_url().map_err(ImageHostError::decode)
}

fn map_transport_error(error: reqwest::Error) -> ImageHostError {
    if error.is_timeout() {
        ImageHostError::transport(format!("request timed out: {error}"))
    } else {
        ImageHostError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ImageHostError {
    let message = serde_json::from_slice::<ErrorReplyDto>(body)
        .map(|reply| reply.error.message)
        .unwrap_or_else(|_| String::from_utf8_lossy(body).chars().take(160).collect());
    ImageHostError::rejected(status.as_u16(), message)
}
