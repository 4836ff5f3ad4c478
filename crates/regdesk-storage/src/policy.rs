//! Upload policy: which attachments the bucket accepts.

use regdesk_core::config::StorageConfig;
use regdesk_core::error::AppError;
use regdesk_core::result::AppResult;

const MB: u64 = 1024 * 1024;

/// MIME allow-list and size cap checked before any upload is signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    allowed_mime_types: Vec<String>,
    max_size_bytes: u64,
}

impl UploadPolicy {
    /// Create a policy.
    pub fn new(allowed_mime_types: Vec<String>, max_size_bytes: u64) -> Self {
        Self {
            allowed_mime_types: allowed_mime_types
                .into_iter()
                .map(|m| m.to_ascii_lowercase())
                .collect(),
            max_size_bytes,
        }
    }

    /// Build the policy from storage configuration.
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(
            config.allowed_mime_types.clone(),
            config.max_upload_size_bytes,
        )
    }

    /// Maximum accepted size in bytes.
    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_bytes
    }

    /// Check a declared MIME type and size.
    pub fn check(&self, mime_type: &str, file_size: i64) -> AppResult<()> {
        let mime = mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if !self.allowed_mime_types.iter().any(|m| *m == mime) {
            return Err(AppError::validation(format!(
                "File type not allowed: {mime_type}"
            )));
        }

        if file_size <= 0 {
            return Err(AppError::validation("File is empty"));
        }
        if file_size as u64 > self.max_size_bytes {
            return Err(AppError::validation(format!(
                "File exceeds maximum size of {} MB",
                self.max_size_bytes / MB
            )));
        }
        Ok(())
    }
}
