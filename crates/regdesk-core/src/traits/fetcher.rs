//! Content fetcher trait used by the markdown converter.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Fetches the raw bytes behind a (signed) URL.
#[async_trait]
pub trait ContentFetcher: Send + Sync + std::fmt::Debug + 'static {
    /// Download the full body at `url`.
    async fn fetch(&self, url: &str) -> AppResult<Bytes>;
}
