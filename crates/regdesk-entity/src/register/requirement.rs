//! Regulatory requirement entity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Compliance status of a requirement.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "requirement_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RequirementStatus {
    /// Not assessed yet.
    #[default]
    NotStarted,
    /// Work under way.
    InProgress,
    /// Met.
    Compliant,
    /// Not met.
    NonCompliant,
}

/// An obligation drawn from a regulation or internal standard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    /// Unique identifier.
    pub id: Uuid,
    /// Reference within the source (e.g. `"MLR 2017 reg. 19"`).
    pub reference: String,
    /// Short title.
    pub title: String,
    /// Full text or summary.
    pub description: Option<String>,
    /// Source regulation.
    pub source: String,
    /// Grouping category.
    pub category: Option<String>,
    /// Compliance status.
    pub status: RequirementStatus,
    /// Accountable owner.
    pub owner: Option<String>,
    /// Target date.
    pub due_date: Option<NaiveDate>,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}
