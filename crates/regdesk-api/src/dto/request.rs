//! Request DTOs with validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use regdesk_entity::{FindingSeverity, FindingStatus, RequirementStatus, RiskStatus, VersionStatus};

// ── Documents ────────────────────────────────────────────────

/// Query parameters accepted by `/api/documents`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentParams {
    /// Document ID.
    pub id: Option<String>,
    /// Restrict the listing to one business unit.
    pub business_unit_id: Option<String>,
}

/// Create document request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest {
    /// Owning business unit.
    pub business_unit_id: Uuid,
    /// Title.
    #[validate(length(min = 1, max = 500, message = "title is required"))]
    pub title: String,
    /// Category.
    #[validate(length(min = 1, max = 100, message = "category is required"))]
    pub category: String,
    /// Description.
    pub description: Option<String>,
    /// Owner.
    pub owner: Option<String>,
}

/// Update document request. The business unit cannot change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentRequest {
    /// Title.
    #[validate(length(min = 1, max = 500, message = "title must not be empty"))]
    pub title: Option<String>,
    /// Category.
    #[validate(length(min = 1, max = 100, message = "category must not be empty"))]
    pub category: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Owner.
    pub owner: Option<String>,
}

// ── Document versions ────────────────────────────────────────

/// Create version request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVersionRequest {
    /// Parent document.
    pub document_id: Uuid,
    /// Version label, e.g. `"2.1"`.
    #[validate(length(min = 1, max = 50, message = "version is required"))]
    pub version: String,
    /// Initial status (defaults to draft).
    pub status: Option<VersionStatus>,
    /// Textual content.
    #[serde(default)]
    pub content: String,
    /// Effective date.
    pub effective_date: Option<NaiveDate>,
    /// Change reason.
    pub change_reason: Option<String>,
}

/// Update version metadata request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVersionRequest {
    /// Version label.
    #[validate(length(min = 1, max = 50, message = "version must not be empty"))]
    pub version: Option<String>,
    /// Content.
    pub content: Option<String>,
    /// Effective date.
    pub effective_date: Option<NaiveDate>,
    /// Change reason.
    pub change_reason: Option<String>,
}

/// Status change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    /// New status.
    pub status: VersionStatus,
}

/// Signed upload URL request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlRequest {
    /// Client file name.
    #[validate(length(min = 1, message = "fileName is required"))]
    pub file_name: String,
    /// Declared MIME type.
    #[validate(length(min = 1, message = "mimeType is required"))]
    pub mime_type: String,
    /// Declared size in bytes.
    pub file_size: i64,
}

/// Upload confirmation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmUploadRequest {
    /// Object key returned by the upload URL request.
    #[validate(length(min = 1, message = "storagePath is required"))]
    pub storage_path: String,
    /// Client file name.
    #[validate(length(min = 1, message = "fileName is required"))]
    pub file_name: String,
    /// Uploaded size in bytes.
    pub file_size: i64,
}

// ── Registers ────────────────────────────────────────────────

/// Query parameters accepted by the register endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterParams {
    /// Row ID.
    pub id: Option<String>,
}

/// Create requirement request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequirementRequest {
    #[validate(length(min = 1, max = 100, message = "reference is required"))]
    pub reference: String,
    #[validate(length(min = 1, max = 500, message = "title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 200, message = "source is required"))]
    pub source: String,
    pub category: Option<String>,
    pub status: Option<RequirementStatus>,
    pub owner: Option<String>,
    pub due_date: Option<NaiveDate>,
}

/// Update requirement request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequirementRequest {
    #[validate(length(min = 1, max = 100))]
    pub reference: Option<String>,
    #[validate(length(min = 1, max = 500))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub source: Option<String>,
    pub category: Option<String>,
    pub status: Option<RequirementStatus>,
    pub owner: Option<String>,
    pub due_date: Option<NaiveDate>,
}

/// Create finding request. The reporter is the calling actor.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFindingRequest {
    #[validate(length(min = 1, max = 500, message = "title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub severity: FindingSeverity,
    pub status: Option<FindingStatus>,
    pub requirement_id: Option<Uuid>,
    pub due_date: Option<NaiveDate>,
}

/// Update finding request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFindingRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub severity: Option<FindingSeverity>,
    pub status: Option<FindingStatus>,
    pub requirement_id: Option<Uuid>,
    pub due_date: Option<NaiveDate>,
}

/// Create knowledge-base article request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleRequest {
    #[validate(length(min = 1, max = 500, message = "title is required"))]
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub published: bool,
}

/// Update knowledge-base article request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticleRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: Option<String>,
    pub body: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub published: Option<bool>,
}

/// Create risk request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRiskRequest {
    #[validate(length(min = 1, max = 500, message = "title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    #[validate(range(min = 1, max = 5, message = "likelihood must be between 1 and 5"))]
    pub likelihood: i32,
    #[validate(range(min = 1, max = 5, message = "impact must be between 1 and 5"))]
    pub impact: i32,
    pub owner: Option<String>,
    pub status: Option<RiskStatus>,
    pub mitigation: Option<String>,
}

/// Update risk request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRiskRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    #[validate(range(min = 1, max = 5, message = "likelihood must be between 1 and 5"))]
    pub likelihood: Option<i32>,
    #[validate(range(min = 1, max = 5, message = "impact must be between 1 and 5"))]
    pub impact: Option<i32>,
    pub owner: Option<String>,
    pub status: Option<RiskStatus>,
    pub mitigation: Option<String>,
}

// ── Audit, jobs, conversion ──────────────────────────────────

/// Query parameters accepted by `/api/audit-logs`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditParams {
    /// Entity type, e.g. `document_version`.
    pub entity_type: Option<String>,
    /// Entity ID.
    pub entity_id: Option<String>,
}

/// Enqueue AI job request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EnqueueJobRequest {
    /// Job type understood by the runner, e.g. `gap_analysis`.
    #[validate(length(min = 1, max = 64, message = "jobType is required"))]
    pub job_type: String,
    /// Subject entity.
    pub entity_id: Uuid,
}

/// Standalone conversion request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConvertRequest {
    /// URL of the document to convert.
    #[validate(required(message = "url is required"), length(min = 1, message = "url is required"))]
    pub url: Option<String>,
    /// File name used to pick the extractor.
    pub filename: Option<String>,
}

impl ConvertRequest {
    /// File name assumed when the client sends none.
    pub const DEFAULT_FILENAME: &'static str = "document.pdf";
}
