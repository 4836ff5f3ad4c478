//! API client configuration.

use serde::{Deserialize, Serialize};

/// Settings for the typed API client and its query cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the RegDesk API (without the `/api` suffix).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Identity forwarded in the `x-user-email` header.
    #[serde(default)]
    pub user_email: Option<String>,
    /// AI-job poll interval in milliseconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    /// Maximum number of cached query results.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,
    /// Time-to-live of cached query results in seconds.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_email: None,
            poll_interval_ms: default_poll_interval(),
            cache_capacity: default_cache_capacity(),
            cache_ttl_seconds: default_cache_ttl(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_poll_interval() -> u64 {
    2000
}

fn default_cache_capacity() -> u64 {
    1000
}

fn default_cache_ttl() -> u64 {
    300
}
