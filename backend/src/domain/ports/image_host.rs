//! Port for the external image host.
//!
//! Uploads are best effort. Callers decide whether a failure matters; the
//! admin add flow logs it and carries on without an image.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by image host adapters.
    pub enum ImageHostError {
        /// The request could not be sent or timed out.
        Transport { message: String } => "image host transport failed: {message}",
        /// The host answered with a non-success status.
        Rejected { status: u16, message: String } =>
            "image host rejected upload with status {status}: {message}",
        /// The reply could not be decoded into a hosted URL.
        Decode { message: String } => "image host reply could not be decoded: {message}",
    }
}

/// Binary image content received from an upload form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Build an upload only when both the file name and content are present.
    ///
    /// Browsers submit an empty part for an untouched file input; that case
    /// yields `None`.
    pub fn from_parts(
        file_name: Option<String>,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> Option<Self> {
        let file_name = file_name.filter(|name| !name.trim().is_empty())?;
        if bytes.is_empty() {
            return None;
        }
        Some(Self {
            file_name,
            content_type,
            bytes,
        })
    }
}

/// Port for storing image content and returning its public URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Upload the image and return the hosted URL.
    async fn upload(&self, image: ImageUpload) -> Result<String, ImageHostError>;
}
