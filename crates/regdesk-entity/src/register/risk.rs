//! Risk register entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lowest likelihood/impact rating.
pub const MIN_RATING: i32 = 1;
/// Highest likelihood/impact rating.
pub const MAX_RATING: i32 = 5;

/// Treatment status of a risk.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "risk_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RiskStatus {
    /// Identified, untreated.
    #[default]
    Open,
    /// Mitigation in progress.
    Mitigating,
    /// Accepted by the owner.
    Accepted,
    /// No longer relevant.
    Closed,
}

/// An entry in the risk register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Risk {
    /// Unique identifier.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Category.
    pub category: Option<String>,
    /// Likelihood rating, 1 to 5.
    pub likelihood: i32,
    /// Impact rating, 1 to 5.
    pub impact: i32,
    /// Owner.
    pub owner: Option<String>,
    /// Status.
    pub status: RiskStatus,
    /// Mitigation plan.
    pub mitigation: Option<String>,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl Risk {
    /// Inherent risk score (likelihood × impact).
    pub fn score(&self) -> i32 {
        self.likelihood * self.impact
    }
}
