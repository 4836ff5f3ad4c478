//! In-memory object storage provider.
//!
//! Used for local development without a bucket and by the test suites.
//! Every signing and removal call is recorded so callers can assert on
//! side effects.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;
use uuid::Uuid;

use regdesk_core::error::AppError;
use regdesk_core::result::AppResult;
use regdesk_core::traits::{ObjectStorage, SignedUpload};

const SCHEME: &str = "memory://";

#[derive(Debug, Default)]
struct State {
    objects: HashMap<String, Bytes>,
    signed_uploads: Vec<String>,
    signed_downloads: Vec<String>,
    removed: Vec<String>,
    fail_removals: bool,
}

/// Process-local object storage.
#[derive(Debug, Clone)]
pub struct MemoryObjectStorage {
    bucket: String,
    state: Arc<RwLock<State>>,
}

impl MemoryObjectStorage {
    /// Create an empty store for `bucket`.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            state: Arc::new(RwLock::new(State::default())),
        }
    }

    /// Store an object directly, as a client upload would.
    pub async fn put_object(&self, path: impl Into<String>, data: impl Into<Bytes>) {
        self.state
            .write()
            .await
            .objects
            .insert(path.into(), data.into());
    }

    /// Read back an object.
    pub async fn object(&self, path: &str) -> Option<Bytes> {
        self.state.read().await.objects.get(path).cloned()
    }

    /// Resolve a URL produced by this store to the object bytes.
    pub async fn object_at_url(&self, url: &str) -> Option<Bytes> {
        let path = path_from_url(&self.bucket, url)?;
        self.object(&path).await
    }

    /// Paths passed to `create_signed_upload_url`, in call order.
    pub async fn signed_uploads(&self) -> Vec<String> {
        self.state.read().await.signed_uploads.clone()
    }

    /// Paths passed to `create_signed_url`, in call order.
    pub async fn signed_downloads(&self) -> Vec<String> {
        self.state.read().await.signed_downloads.clone()
    }

    /// Paths passed to `remove`, in call order.
    pub async fn removed(&self) -> Vec<String> {
        self.state.read().await.removed.clone()
    }

    /// Make every subsequent `remove` fail with a storage error.
    pub async fn fail_removals(&self, fail: bool) {
        self.state.write().await.fail_removals = fail;
    }

    fn url_for(&self, path: &str) -> String {
        format!("{SCHEME}{}/{path}", self.bucket)
    }
}

/// Extract the object path from a `memory://{bucket}/{path}?...` URL.
pub fn path_from_url(bucket: &str, url: &str) -> Option<String> {
    let rest = url.strip_prefix(SCHEME)?.strip_prefix(bucket)?.strip_prefix('/')?;
    let path = rest.split_once('?').map_or(rest, |(p, _)| p);
    Some(path.to_string())
}

#[async_trait]
impl ObjectStorage for MemoryObjectStorage {
    fn provider_type(&self) -> &str {
        "memory"
    }

    fn bucket_id(&self) -> &str {
        &self.bucket
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn create_signed_upload_url(&self, path: &str) -> AppResult<SignedUpload> {
        self.state
            .write()
            .await
            .signed_uploads
            .push(path.to_string());

        let token = Uuid::new_v4().simple().to_string();
        Ok(SignedUpload {
            signed_url: format!("{}?token={token}", self.url_for(path)),
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
        self.state
            .write()
            .await
            .signed_downloads
            .push(path.to_string());

        let mut url = format!("{}?expires={}", self.url_for(path), expires_in.as_secs());
        if let Some(name) = download_name {
            url.push_str("&download=");
            url.push_str(name);
        }
        Ok(url)
    }

    async fn remove(&self, path: &str) -> AppResult<()> {
        let mut state = self.state.write().await;
        if state.fail_removals {
            return Err(AppError::storage(format!("Failed to delete object {path}")));
        }
        state.objects.remove(path);
        state.removed.push(path.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_signed_url_resolves_to_object() {
        let storage = MemoryObjectStorage::new("docs");
        storage.put_object("bu/doc/v/1-a.pdf", "pdf bytes").await;

        let url = storage
            .create_signed_url("bu/doc/v/1-a.pdf", Duration::from_secs(3600), Some("a.pdf"))
            .await
            .unwrap();

        assert!(url.starts_with("memory://docs/bu/doc/v/1-a.pdf?expires=3600"));
        assert!(url.ends_with("&download=a.pdf"));
        assert_eq!(
            storage.object_at_url(&url).await.as_deref(),
            Some(&b"pdf bytes"[..])
        );
        assert_eq!(storage.signed_downloads().await, vec!["bu/doc/v/1-a.pdf"]);
    }

    #[tokio::test]
    async fn test_upload_token_is_part_of_url() {
        let storage = MemoryObjectStorage::new("docs");
        let signed = storage.create_signed_upload_url("p/x.pdf").await.unwrap();
        assert!(signed.signed_url.ends_with(&signed.token));
        assert_eq!(signed.path, "p/x.pdf");
    }

    #[tokio::test]
    async fn test_failing_removal_keeps_object() {
        let storage = MemoryObjectStorage::new("docs");
        storage.put_object("p/x.pdf", "x").await;
        storage.fail_removals(true).await;

        assert!(storage.remove("p/x.pdf").await.is_err());
        assert!(storage.object("p/x.pdf").await.is_some());
        assert!(storage.removed().await.is_empty());
    }
}
