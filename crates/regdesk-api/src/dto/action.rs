//! Typed commands parsed from the `action` query parameter.
//!
//! Each resource method has its own enum, so a handler dispatches with an
//! exhaustive `match` and an unknown action never reaches a service.

use serde::Deserialize;
use uuid::Uuid;

use regdesk_core::error::AppError;
use regdesk_service::DownloadMode;

use crate::extractors::query::require_uuid;

/// Query parameters accepted by `/api/document-versions`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionParams {
    /// Version ID.
    pub id: Option<String>,
    /// Parent document ID (list only).
    pub document_id: Option<String>,
    /// Action name.
    pub action: Option<String>,
    /// Download mode: `view` or `download`.
    pub mode: Option<String>,
}

/// Query parameters accepted by `/api/ai-jobs`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobParams {
    /// Job ID.
    pub id: Option<String>,
    /// Entity whose jobs to list.
    pub entity_id: Option<String>,
    /// Action name.
    pub action: Option<String>,
}

fn unknown_action(action: &str) -> AppError {
    AppError::validation(format!("Unknown action: {action}"))
}

fn parse_mode(mode: Option<&str>) -> Result<DownloadMode, AppError> {
    match mode {
        None | Some("view") => Ok(DownloadMode::View),
        Some("download") => Ok(DownloadMode::Download),
        Some(other) => Err(AppError::validation(format!("Invalid mode: {other}"))),
    }
}

/// `GET /api/document-versions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionQuery {
    /// All versions of a document.
    List { document_id: Uuid },
    /// One version.
    Get { id: Uuid },
    /// Signed download URL of the attachment.
    Download { id: Uuid, mode: DownloadMode },
    /// Markdown rendition of the attachment.
    ToMarkdown { id: Uuid },
}

impl TryFrom<&VersionParams> for VersionQuery {
    type Error = AppError;

    fn try_from(p: &VersionParams) -> Result<Self, Self::Error> {
        match p.action.as_deref() {
            None => match (&p.id, &p.document_id) {
                (Some(_), _) => Ok(Self::Get {
                    id: require_uuid("id", p.id.as_deref())?,
                }),
                (None, Some(_)) => Ok(Self::List {
                    document_id: require_uuid("documentId", p.document_id.as_deref())?,
                }),
                (None, None) => Err(AppError::validation("id or documentId is required")),
            },
            Some("download") => Ok(Self::Download {
                id: require_uuid("id", p.id.as_deref())?,
                mode: parse_mode(p.mode.as_deref())?,
            }),
            Some("to-markdown") => Ok(Self::ToMarkdown {
                id: require_uuid("id", p.id.as_deref())?,
            }),
            Some(other) => Err(unknown_action(other)),
        }
    }
}

/// `POST /api/document-versions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionCommand {
    /// Create a version.
    Create,
    /// Request a signed upload URL.
    UploadUrl { id: Uuid },
    /// Confirm a finished upload.
    ConfirmUpload { id: Uuid },
}

impl TryFrom<&VersionParams> for VersionCommand {
    type Error = AppError;

    fn try_from(p: &VersionParams) -> Result<Self, Self::Error> {
        match p.action.as_deref() {
            None => Ok(Self::Create),
            Some("upload-url") => Ok(Self::UploadUrl {
                id: require_uuid("id", p.id.as_deref())?,
            }),
            Some("upload-confirm") => Ok(Self::ConfirmUpload {
                id: require_uuid("id", p.id.as_deref())?,
            }),
            Some(other) => Err(unknown_action(other)),
        }
    }
}

/// `PUT /api/document-versions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionUpdate {
    /// Edit label, content, effective date or change reason.
    Metadata { id: Uuid },
    /// Move to another status.
    Status { id: Uuid },
}

impl TryFrom<&VersionParams> for VersionUpdate {
    type Error = AppError;

    fn try_from(p: &VersionParams) -> Result<Self, Self::Error> {
        let id = || require_uuid("id", p.id.as_deref());
        match p.action.as_deref() {
            None => Ok(Self::Metadata { id: id()? }),
            Some("status") => Ok(Self::Status { id: id()? }),
            Some(other) => Err(unknown_action(other)),
        }
    }
}

/// `DELETE /api/document-versions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionRemoval {
    /// Delete the version itself (refused).
    Version { id: Uuid },
    /// Remove the attached PDF.
    Pdf { id: Uuid },
}

impl TryFrom<&VersionParams> for VersionRemoval {
    type Error = AppError;

    fn try_from(p: &VersionParams) -> Result<Self, Self::Error> {
        let id = || require_uuid("id", p.id.as_deref());
        match p.action.as_deref() {
            None => Ok(Self::Version { id: id()? }),
            Some("pdf") => Ok(Self::Pdf { id: id()? }),
            Some(other) => Err(unknown_action(other)),
        }
    }
}

/// `GET /api/ai-jobs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobQuery {
    /// One job.
    Get { id: Uuid },
    /// Jobs of an entity.
    ForEntity { entity_id: Uuid },
}

impl TryFrom<&JobParams> for JobQuery {
    type Error = AppError;

    fn try_from(p: &JobParams) -> Result<Self, Self::Error> {
        if let Some(action) = p.action.as_deref() {
            return Err(unknown_action(action));
        }
        match (&p.id, &p.entity_id) {
            (Some(_), _) => Ok(Self::Get {
                id: require_uuid("id", p.id.as_deref())?,
            }),
            (None, Some(_)) => Ok(Self::ForEntity {
                entity_id: require_uuid("entityId", p.entity_id.as_deref())?,
            }),
            (None, None) => Err(AppError::validation("id or entityId is required")),
        }
    }
}

/// `POST /api/ai-jobs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobCommand {
    /// Enqueue a new job.
    Enqueue,
    /// Ask the runner to stop a job.
    Cancel { id: Uuid },
}

impl TryFrom<&JobParams> for JobCommand {
    type Error = AppError;

    fn try_from(p: &JobParams) -> Result<Self, Self::Error> {
        match p.action.as_deref() {
            None => Ok(Self::Enqueue),
            Some("cancel") => Ok(Self::Cancel {
                id: require_uuid("id", p.id.as_deref())?,
            }),
            Some(other) => Err(unknown_action(other)),
        }
    }
}
