//! Response DTOs.

use serde::{Deserialize, Serialize};

use regdesk_entity::Risk;

/// Markdown rendition of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownResponse {
    /// Extracted markdown.
    pub markdown: String,
}

/// A risk together with its derived score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskView {
    /// The stored row.
    #[serde(flatten)]
    pub risk: Risk,
    /// Likelihood × impact.
    pub score: i32,
}

impl From<Risk> for RiskView {
    fn from(risk: Risk) -> Self {
        let score = risk.score();
        Self { risk, score }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// `connected`, `unavailable` or `not_configured`.
    pub database: String,
}
