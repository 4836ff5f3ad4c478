//! Markdown conversion configuration.

use serde::{Deserialize, Serialize};

/// Settings for fetching and converting attachments to markdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Timeout for fetching source bytes, in seconds.
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_seconds: u64,
    /// Largest source accepted for conversion, in bytes.
    #[serde(default = "default_max_source")]
    pub max_source_bytes: u64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_seconds: default_fetch_timeout(),
            max_source_bytes: default_max_source(),
        }
    }
}

fn default_fetch_timeout() -> u64 {
    60
}

fn default_max_source() -> u64 {
    50 * 1024 * 1024
}
