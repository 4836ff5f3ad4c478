//! HTTP content fetcher.

use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use tracing::debug;

use regdesk_core::config::ConversionConfig;
use regdesk_core::error::{AppError, ErrorKind};
use regdesk_core::result::AppResult;
use regdesk_core::traits::ContentFetcher;

/// Downloads signed URLs with `reqwest`, enforcing a size cap while reading.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    max_bytes: u64,
}

impl HttpFetcher {
    /// Create a fetcher from conversion configuration.
    pub fn new(config: &ConversionConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;
        Ok(Self {
            client,
            max_bytes: config.max_source_bytes,
        })
    }

    fn too_large(&self) -> AppError {
        AppError::validation(format!(
            "Source document exceeds the {} byte limit",
            self.max_bytes
        ))
    }
}

#[async_trait]
impl ContentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> AppResult<Bytes> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "Failed to fetch document", e)
            })?;

        if response
            .content_length()
            .is_some_and(|len| len > self.max_bytes)
        {
            return Err(self.too_large());
        }

        let mut body = BytesMut::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "Failed to read document body", e)
        })? {
            if (body.len() + chunk.len()) as u64 > self.max_bytes {
                return Err(self.too_large());
            }
            body.extend_from_slice(&chunk);
        }

        debug!(bytes = body.len(), "Fetched document");
        Ok(body.freeze())
    }
}
