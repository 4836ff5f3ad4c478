//! # regdesk-entity
//!
//! Domain entity models for RegDesk. Every struct in this crate represents
//! a database table row or a domain value object. Entities serialize with
//! camelCase field names, matching the JSON the API exposes, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod audit;
pub mod document;
pub mod job;
pub mod register;

pub use audit::{AuditAction, AuditLogEntry, EntityType, NewAuditLogEntry};
pub use document::{Document, DocumentVersion, PdfAttachment, VersionStatus};
pub use job::{AiJob, AiJobStatus};
pub use register::{
    Finding, FindingSeverity, FindingStatus, KnowledgeArticle, Requirement, RequirementStatus,
    Risk, RiskStatus,
};
