//! Object storage trait for signed-URL based attachment storage.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// A pre-authorized upload target for a single object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUpload {
    /// URL the client sends the object bytes to.
    pub signed_url: String,
    /// Opaque upload token bound to the signed URL.
    pub token: String,
    /// Object key inside the bucket.
    pub path: String,
}

/// Trait for object storage backends.
///
/// Binary payloads never pass through RegDesk itself: clients upload and
/// download directly against time-limited signed URLs produced here. The
/// trait is defined in `regdesk-core` and implemented in `regdesk-storage`.
#[async_trait]
pub trait ObjectStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "s3", "memory").
    fn provider_type(&self) -> &str;

    /// Bucket the provider reads from and writes to.
    fn bucket_id(&self) -> &str;

    /// Check whether the provider is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Create a signed upload URL for `path`.
    async fn create_signed_upload_url(&self, path: &str) -> AppResult<SignedUpload>;

    /// Create a signed download URL for `path`, valid for `expires_in`.
    ///
    /// When `download_name` is set the URL forces a file download with
    /// that name instead of inline display.
    async fn create_signed_url(
        &self,
        path: &str,
        expires_in: Duration,
        download_name: Option<&str>,
    ) -> AppResult<String>;

    /// Delete the object at `path`.
    async fn remove(&self, path: &str) -> AppResult<()>;
}
