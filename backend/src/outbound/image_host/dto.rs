//! DTOs for decoding Cloudinary upload replies.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct UploadReplyDto {
    pub(super) secure_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorReplyDto {
    pub(super) error: ErrorBodyDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBodyDto {
    pub(super) message: String,
}

impl UploadReplyDto {
    /// The hosted URL, rejecting replies that omit it.
    pub(super) fn into_secure_url(self) -> Result<String, String> {
        self.secure_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| "upload reply did not include secure_url".to_owned())
    }
}
