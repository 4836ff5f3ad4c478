//! Audit log entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::action::{AuditAction, EntityType};

/// An immutable audit log entry recording one mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    /// Unique audit entry identifier.
    pub id: Uuid,
    /// Type of the mutated entity (e.g., `"document_version"`).
    pub entity_type: String,
    /// Identifier of the mutated entity.
    pub entity_id: Uuid,
    /// The action that was performed (e.g., `"pdf_uploaded"`).
    pub action: String,
    /// Who performed the action.
    pub actor: String,
    /// Human-readable description of the change.
    pub details: String,
    /// When the action occurred.
    pub created_at: DateTime<Utc>,
}

/// Data required to append a new audit log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAuditLogEntry {
    /// Entity type.
    pub entity_type: EntityType,
    /// Entity ID.
    pub entity_id: Uuid,
    /// Action performed.
    pub action: AuditAction,
    /// Actor.
    pub actor: String,
    /// Details.
    pub details: String,
}

impl NewAuditLogEntry {
    /// Build a new entry.
    pub fn new(
        entity_type: EntityType,
        entity_id: Uuid,
        action: AuditAction,
        actor: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            entity_type,
            entity_id,
            action,
            actor: actor.into(),
            details: details.into(),
        }
    }

    /// Materialize the row with a fresh id and timestamp.
    pub fn into_entry(self) -> AuditLogEntry {
        AuditLogEntry {
            id: Uuid::new_v4(),
            entity_type: self.entity_type.as_str().to_string(),
            entity_id: self.entity_id,
            action: self.action.as_str().to_string(),
            actor: self.actor,
            details: self.details,
            created_at: Utc::now(),
        }
    }
}
