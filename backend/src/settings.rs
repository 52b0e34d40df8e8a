//! Runtime configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, configuration files and environment variables
//! in OrthoConfig's usual precedence order. Scalar limits carry OrthoConfig
//! defaults so an empty environment still loads; optional text values fall
//! back through the accessors.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::image_host::CloudinaryCredentials;

const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listener port.
pub const DEFAULT_PORT: u16 = 8000;
/// Default cap on the admin multipart body (10 MiB).
pub const DEFAULT_UPLOAD_LIMIT_BYTES: usize = 10 * 1024 * 1024;
/// Default per-upload image host timeout in seconds.
pub const DEFAULT_IMAGE_TIMEOUT_SECS: u64 = 15;

/// Conventional variable consulted when no prefixed database URL is set.
pub const FALLBACK_DATABASE_URL_VAR: &str = "DATABASE_URL";

/// HTTP listener and item store settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "UBUNTUCYCLE")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    #[ortho_config(default = 8000)]
    pub port: u16,
    /// PostgreSQL connection URL. Without one the board runs from memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Largest multipart body accepted by the admin add form.
    #[ortho_config(default = 10_485_760)]
    pub upload_limit_bytes: usize,
}

impl ServerSettings {
    /// Return the configured interface, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the port to bind.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Return the multipart body limit in bytes.
    pub fn upload_limit_bytes(&self) -> usize {
        self.upload_limit_bytes
    }

    /// Database URL from settings, falling back to `DATABASE_URL`.
    ///
    /// Blank values count as unset.
    pub fn database_url(&self) -> Option<String> {
        self.database_url
            .clone()
            .or_else(|| std::env::var(FALLBACK_DATABASE_URL_VAR).ok())
            .filter(|url| !url.trim().is_empty())
    }
}

/// Credentials and limits for the external image host.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CLOUDINARY")]
pub struct ImageHostSettings {
    /// Cloudinary account ("cloud") name.
    pub cloud_name: Option<String>,
    /// API key used to sign uploads.
    pub api_key: Option<String>,
    /// API secret used to sign uploads.
    pub api_secret: Option<String>,
    /// Per-upload request timeout in seconds.
    #[ortho_config(default = 15)]
    pub timeout_secs: u64,
}

impl ImageHostSettings {
    /// Credentials when all three values are present and non-blank.
    ///
    /// Partial configuration disables uploads rather than failing startup.
    pub fn credentials(&self) -> Option<CloudinaryCredentials> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_owned)
        };
        Some(CloudinaryCredentials {
            cloud_name: present(&self.cloud_name)?,
            api_key: present(&self.api_key)?,
            api_secret: present(&self.api_secret)?,
        })
    }

    /// Return the per-upload request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
