//! Object storage configuration.

use serde::{Deserialize, Serialize};

/// MIME type for PDF uploads.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Top-level object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Provider: `"s3"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Bucket holding document attachments.
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Maximum attachment size in bytes (default 50 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// MIME types accepted for attachments.
    #[serde(default = "default_allowed_mime_types")]
    pub allowed_mime_types: Vec<String>,
    /// Lifetime of signed upload URLs in seconds.
    #[serde(default = "default_upload_expiry")]
    pub upload_url_expiry_seconds: u64,
    /// Lifetime of signed download URLs in seconds.
    #[serde(default = "default_download_expiry")]
    pub download_url_expiry_seconds: u64,
    /// S3-compatible storage configuration.
    #[serde(default)]
    pub s3: S3StorageConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            bucket: default_bucket(),
            max_upload_size_bytes: default_max_upload(),
            allowed_mime_types: default_allowed_mime_types(),
            upload_url_expiry_seconds: default_upload_expiry(),
            download_url_expiry_seconds: default_download_expiry(),
            s3: S3StorageConfig::default(),
        }
    }
}

/// S3-compatible object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3StorageConfig {
    /// S3 endpoint URL (for non-AWS services like MinIO). Empty uses AWS.
    #[serde(default)]
    pub endpoint: String,
    /// AWS region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Access key ID. Empty falls back to the default credential chain.
    #[serde(default)]
    pub access_key: String,
    /// Secret access key.
    #[serde(default)]
    pub secret_key: String,
    /// Use path-style addressing (required by most S3-compatible servers).
    #[serde(default)]
    pub force_path_style: bool,
}

impl Default for S3StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            region: default_region(),
            access_key: String::new(),
            secret_key: String::new(),
            force_path_style: false,
        }
    }
}

fn default_provider() -> String {
    "s3".to_string()
}

fn default_bucket() -> String {
    "compliance-documents".to_string()
}

fn default_max_upload() -> u64 {
    50 * 1024 * 1024
}

fn default_allowed_mime_types() -> Vec<String> {
    vec![
        PDF_MIME_TYPE.to_string(),
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document".to_string(),
        "application/vnd.openxmlformats-officedocument.presentationml.presentation".to_string(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
    ]
}

fn default_upload_expiry() -> u64 {
    600
}

fn default_download_expiry() -> u64 {
    3600
}

fn default_region() -> String {
    "eu-west-2".to_string()
}
