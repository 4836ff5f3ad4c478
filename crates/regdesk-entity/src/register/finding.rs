//! Audit finding entity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "finding_severity", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FindingSeverity {
    /// Low.
    Low,
    /// Medium.
    Medium,
    /// High.
    High,
    /// Critical.
    Critical,
}

/// Remediation status of a finding.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "finding_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FindingStatus {
    /// Raised, not yet worked on.
    #[default]
    Open,
    /// Remediation under way.
    InProgress,
    /// Remediated, awaiting verification.
    Resolved,
    /// Verified and closed.
    Closed,
}

/// A gap or issue raised against the compliance programme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Unique identifier.
    pub id: Uuid,
    /// Short title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Severity.
    pub severity: FindingSeverity,
    /// Status.
    pub status: FindingStatus,
    /// Related requirement.
    pub requirement_id: Option<Uuid>,
    /// Who raised the finding.
    pub raised_by: String,
    /// Remediation deadline.
    pub due_date: Option<NaiveDate>,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}
