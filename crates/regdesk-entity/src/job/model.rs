//! AI job entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::AiJobStatus;

/// A job owned by the external AI runner (summaries, gap analyses...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AiJob {
    /// Unique job identifier.
    pub id: Uuid,
    /// Job type identifier (e.g., `"gap_analysis"`).
    pub job_type: String,
    /// Entity the job works on.
    pub entity_id: Uuid,
    /// Current status.
    pub status: AiJobStatus,
    /// Last progress message reported by the runner.
    pub progress_message: Option<String>,
    /// Result data on completion.
    pub result: Option<serde_json::Value>,
    /// Error message on failure.
    pub error_message: Option<String>,
    /// When the job was created.
    pub created_at: DateTime<Utc>,
    /// When the job was last updated.
    pub updated_at: DateTime<Utc>,
    /// When the job reached a terminal status.
    pub completed_at: Option<DateTime<Utc>>,
}

impl AiJob {
    /// Build a new pending job.
    pub fn pending(job_type: impl Into<String>, entity_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            job_type: job_type.into(),
            entity_id,
            status: AiJobStatus::Pending,
            progress_message: None,
            result: None,
            error_message: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }
}
