//! Build the configured object storage provider.

use std::sync::Arc;
#[cfg(feature = "s3")]
use std::time::Duration;

use tracing::info;

use regdesk_core::config::StorageConfig;
use regdesk_core::error::AppError;
use regdesk_core::result::AppResult;
use regdesk_core::traits::ObjectStorage;

use crate::providers::MemoryObjectStorage;

/// Create the provider named by `config.provider`.
pub async fn build_object_storage(config: &StorageConfig) -> AppResult<Arc<dyn ObjectStorage>> {
    let provider: Arc<dyn ObjectStorage> = match config.provider.as_str() {
        "memory" => Arc::new(MemoryObjectStorage::new(&config.bucket)),
        #[cfg(feature = "s3")]
        "s3" => Arc::new(
            crate::providers::S3ObjectStorage::new(&config.bucket, &config.s3)
                .await?
                .with_upload_expiry(Duration::from_secs(config.upload_url_expiry_seconds)),
        ),
        other => {
            return Err(AppError::configuration(format!(
                "Unknown storage provider: {other}"
            )));
        }
    };

    info!(
        provider = provider.provider_type(),
        bucket = provider.bucket_id(),
        "Object storage ready"
    );
    Ok(provider)
}
