//! S3-compatible object storage provider.
//!
//! Uploads and downloads are pre-signed with SigV4; the server itself only
//! ever issues `HeadBucket` and `DeleteObject` requests.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::presigning::PresigningConfig;
use tracing::{debug, info, warn};

use regdesk_core::config::S3StorageConfig;
use regdesk_core::error::{AppError, ErrorKind};
use regdesk_core::result::AppResult;
use regdesk_core::traits::{ObjectStorage, SignedUpload};

/// Query parameter carrying the SigV4 signature of a presigned URL.
const SIGNATURE_PARAM: &str = "X-Amz-Signature=";

/// Default lifetime of a signed upload URL.
const DEFAULT_UPLOAD_EXPIRY: Duration = Duration::from_secs(600);

/// S3 object storage provider.
#[derive(Debug, Clone)]
pub struct S3ObjectStorage {
    client: Client,
    bucket: String,
    upload_expiry: Duration,
}

impl S3ObjectStorage {
    /// Create a provider for `bucket` from configuration.
    ///
    /// Empty credentials fall back to the default AWS credential chain and
    /// an empty endpoint to AWS itself.
    pub async fn new(bucket: &str, config: &S3StorageConfig) -> AppResult<Self> {
        if bucket.trim().is_empty() {
            return Err(AppError::configuration("storage.bucket is not set"));
        }

        info!(
            endpoint = %config.endpoint,
            region = %config.region,
            bucket,
            "Initializing S3 storage provider"
        );

        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));
        if !config.access_key.is_empty() {
            loader = loader.credentials_provider(Credentials::new(
                config.access_key.clone(),
                config.secret_key.clone(),
                None,
                None,
                "regdesk-config",
            ));
        }
        if !config.endpoint.is_empty() {
            loader = loader.endpoint_url(config.endpoint.clone());
        }
        let shared = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(config.force_path_style)
            .build();

        Ok(Self {
            client: Client::from_conf(s3_config),
            bucket: bucket.to_string(),
            upload_expiry: DEFAULT_UPLOAD_EXPIRY,
        })
    }

    /// Override the lifetime of signed upload URLs.
    pub fn with_upload_expiry(mut self, expiry: Duration) -> Self {
        self.upload_expiry = expiry;
        self
    }

    fn presigning(expires_in: Duration) -> AppResult<PresigningConfig> {
        PresigningConfig::expires_in(expires_in).map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Invalid presigning configuration", e)
        })
    }
}

#[async_trait]
impl ObjectStorage for S3ObjectStorage {
    fn provider_type(&self) -> &str {
        "s3"
    }

    fn bucket_id(&self) -> &str {
        &self.bucket
    }

    async fn health_check(&self) -> AppResult<bool> {
        match self.client.head_bucket().bucket(&self.bucket).send().await {
            Ok(_) => Ok(true),
            Err(e) => {
                warn!(bucket = %self.bucket, error = %e, "S3 bucket is not reachable");
                Ok(false)
            }
        }
    }

    async fn create_signed_upload_url(&self, path: &str) -> AppResult<SignedUpload> {
        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .presigned(Self::presigning(self.upload_expiry)?)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to sign upload URL", e)
            })?;

        let signed_url = request.uri().to_string();
        let token = signature_token(&signed_url)
            .ok_or_else(|| AppError::storage("Signed upload URL carries no signature"))?;

        debug!(path, "Signed upload URL");
        Ok(SignedUpload {
            signed_url,
            token,
            path: path.to_string(),
        })
    }

    async fn create_signed_url(
        &self,
        path: &str,
        expires_in: Duration,
        download_name: Option<&str>,
    ) -> AppResult<String> {
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(path)
            .set_response_content_disposition(download_name.map(content_disposition))
            .presigned(Self::presigning(expires_in)?)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to sign download URL", e)
            })?;

        Ok(request.uri().to_string())
    }

    async fn remove(&self, path: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to delete object", e))?;
        debug!(path, "Deleted object");
        Ok(())
    }
}

/// Extract the SigV4 signature from a presigned URL's query string.
fn signature_token(url: &str) -> Option<String> {
    let query = url.split_once('?')?.1;
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix(SIGNATURE_PARAM))
        .filter(|sig| !sig.is_empty())
        .map(str::to_string)
}

/// `Content-Disposition` forcing a download under `name`.
fn content_disposition(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
    format!("attachment; filename=\"{escaped}\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_token() {
        let url = "https://bucket.s3.amazonaws.com/a/b.pdf?X-Amz-Algorithm=AWS4-HMAC-SHA256\
                   &X-Amz-Signature=abc123&X-Amz-SignedHeaders=host";
        assert_eq!(signature_token(url).as_deref(), Some("abc123"));
        assert_eq!(signature_token("https://bucket/a.pdf"), None);
    }

    #[test]
    fn test_content_disposition_escapes_quotes() {
        assert_eq!(
            content_disposition("Q3 \"final\".pdf"),
            "attachment; filename=\"Q3 \\\"final\\\".pdf\""
        );
    }
}
