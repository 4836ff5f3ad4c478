//! Audit action and entity type enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of mutation recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Entity created.
    Created,
    /// Entity metadata updated.
    Updated,
    /// Entity deleted.
    Deleted,
    /// Version status changed.
    StatusChanged,
    /// PDF attachment uploaded or replaced.
    PdfUploaded,
    /// PDF attachment removed.
    PdfDeleted,
}

impl AuditAction {
    /// Return the action as stored in the log.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::StatusChanged => "status_changed",
            Self::PdfUploaded => "pdf_uploaded",
            Self::PdfDeleted => "pdf_deleted",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Entity types that appear in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// A document.
    Document,
    /// A document version.
    DocumentVersion,
}

impl EntityType {
    /// Return the entity type as stored in the log.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::DocumentVersion => "document_version",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
