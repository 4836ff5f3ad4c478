//! Document entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A controlled compliance document (policy, procedure, standard...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique document identifier.
    pub id: Uuid,
    /// Owning business unit. Immutable; namespaces attachment storage paths.
    pub business_unit_id: Uuid,
    /// Document title.
    pub title: String,
    /// Document category (e.g. `"policy"`, `"procedure"`).
    pub category: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Accountable owner.
    pub owner: Option<String>,
    /// When the document was created.
    pub created_at: DateTime<Utc>,
    /// When the document was last updated.
    pub updated_at: DateTime<Utc>,
}
