//! Document-version workflow: creation, metadata and status updates, the
//! two-step PDF upload, signed downloads and markdown conversion.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use regdesk_convert::MarkdownConverter;
use regdesk_core::error::AppError;
use regdesk_core::result::AppResult;
use regdesk_core::traits::ObjectStorage;
use regdesk_database::{DocumentStore, DocumentVersionStore};
use regdesk_entity::{
    AuditAction, Document, DocumentVersion, EntityType, PdfAttachment, VersionStatus,
};
use regdesk_storage::{StoragePath, UploadPolicy};

use crate::audit::AuditService;
use crate::context::RequestContext;
use crate::hash::{content_hash, short_hash};

/// Data required to create a version.
#[derive(Debug, Clone)]
pub struct NewVersion {
    /// Parent document.
    pub document_id: Uuid,
    /// Version label.
    pub version: String,
    /// Initial status (defaults to draft).
    pub status: Option<VersionStatus>,
    /// Textual content.
    pub content: String,
    /// Date from which the version is in force.
    pub effective_date: Option<NaiveDate>,
    /// Why the version was created.
    pub change_reason: Option<String>,
}

/// Editable version metadata. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct VersionPatch {
    /// New label.
    pub version: Option<String>,
    /// New content. The stored hash is not recomputed.
    pub content: Option<String>,
    /// New effective date.
    pub effective_date: Option<NaiveDate>,
    /// New change reason.
    pub change_reason: Option<String>,
}

impl VersionPatch {
    fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.version.is_some() {
            fields.push("version");
        }
        if self.content.is_some() {
            fields.push("content");
        }
        if self.effective_date.is_some() {
            fields.push("effective_date");
        }
        if self.change_reason.is_some() {
            fields.push("change_reason");
        }
        fields
    }
}

/// A request to upload an attachment.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Client file name.
    pub file_name: String,
    /// Declared MIME type.
    pub mime_type: String,
    /// Declared size in bytes.
    pub file_size: i64,
}

/// A signed upload target handed back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTicket {
    /// URL to upload the bytes to.
    pub signed_url: String,
    /// Upload token bound to the URL.
    pub token: String,
    /// Object key the upload lands at.
    pub path: String,
    /// Bucket holding the object.
    pub bucket_id: String,
}

/// Confirmation that a client finished uploading.
#[derive(Debug, Clone)]
pub struct ConfirmUpload {
    /// Object key from the upload ticket.
    pub storage_path: String,
    /// Client file name.
    pub file_name: String,
    /// Uploaded size in bytes.
    pub file_size: i64,
}

/// How a signed download URL presents the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadMode {
    /// Inline display.
    #[default]
    View,
    /// Forced download under the stored file name.
    Download,
}

/// A signed download URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedDownload {
    /// The signed URL.
    pub url: String,
    /// Lifetime in seconds.
    pub expires_in: u64,
}

/// Orchestrates the document-version workflow.
#[derive(Debug, Clone)]
pub struct VersionService {
    documents: Arc<dyn DocumentStore>,
    versions: Arc<dyn DocumentVersionStore>,
    audit: AuditService,
    storage: Arc<dyn ObjectStorage>,
    converter: Arc<MarkdownConverter>,
    policy: UploadPolicy,
    download_expiry: Duration,
}

impl VersionService {
    /// Creates a new version service.
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        versions: Arc<dyn DocumentVersionStore>,
        audit: AuditService,
        storage: Arc<dyn ObjectStorage>,
        converter: Arc<MarkdownConverter>,
        policy: UploadPolicy,
        download_expiry: Duration,
    ) -> Self {
        Self {
            documents,
            versions,
            audit,
            storage,
            converter,
            policy,
            download_expiry,
        }
    }

    /// Get a version.
    pub async fn get(&self, id: Uuid) -> AppResult<DocumentVersion> {
        self.versions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Document version not found"))
    }

    /// List the versions of a document, newest first.
    pub async fn list(&self, document_id: Uuid) -> AppResult<Vec<DocumentVersion>> {
        self.versions.find_by_document(document_id).await
    }

    async fn document(&self, id: Uuid) -> AppResult<Document> {
        self.documents
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Document not found"))
    }

    /// Create a version of an existing document.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        data: NewVersion,
    ) -> AppResult<DocumentVersion> {
        let doc = self.document(data.document_id).await?;

        let now = Utc::now();
        let hash = content_hash(&data.content);
        let version = DocumentVersion {
            id: Uuid::new_v4(),
            document_id: doc.id,
            version: data.version,
            status: data.status.unwrap_or_default(),
            content: data.content,
            content_hash: hash,
            pdf_s3_key: None,
            pdf_file_name: None,
            pdf_file_size: None,
            effective_date: data.effective_date,
            created_by: ctx.actor.clone(),
            change_reason: data.change_reason,
            created_at: now,
            updated_at: now,
        };
        let version = self.versions.insert(&version).await?;

        self.audit
            .record(
                ctx,
                EntityType::DocumentVersion,
                version.id,
                AuditAction::Created,
                format!(
                    "Created version {} (hash: {})",
                    version.version,
                    short_hash(&version.content_hash)
                ),
            )
            .await?;

        info!(version_id = %version.id, document_id = %doc.id, "Document version created");
        Ok(version)
    }

    /// Update the editable metadata of a version.
    pub async fn update_metadata(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        patch: VersionPatch,
    ) -> AppResult<DocumentVersion> {
        let mut version = self.get(id).await?;
        let fields = patch.changed_fields();

        if let Some(label) = patch.version {
            version.version = label;
        }
        if let Some(content) = patch.content {
            version.content = content;
        }
        if patch.effective_date.is_some() {
            version.effective_date = patch.effective_date;
        }
        if patch.change_reason.is_some() {
            version.change_reason = patch.change_reason;
        }

        let version = self
            .versions
            .update_metadata(&version)
            .await?
            .ok_or_else(|| AppError::not_found("Document version not found"))?;

        let details = if fields.is_empty() {
            format!("Updated version {}", version.version)
        } else {
            format!("Updated version {}: {}", version.version, fields.join(", "))
        };
        self.audit
            .record(
                ctx,
                EntityType::DocumentVersion,
                id,
                AuditAction::Updated,
                details,
            )
            .await?;

        info!(version_id = %id, "Document version updated");
        Ok(version)
    }

    /// Set the status of a version.
    pub async fn update_status(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        status: VersionStatus,
    ) -> AppResult<DocumentVersion> {
        let current = self.get(id).await?;

        let version = self
            .versions
            .update_status(id, status)
            .await?
            .ok_or_else(|| AppError::not_found("Document version not found"))?;

        self.audit
            .record(
                ctx,
                EntityType::DocumentVersion,
                id,
                AuditAction::StatusChanged,
                format!("{} -> {}", current.status, version.status),
            )
            .await?;

        info!(
            version_id = %id,
            from = %current.status,
            to = %version.status,
            "Document version status changed"
        );
        Ok(version)
    }

    /// Versions are kept forever.
    pub async fn delete(&self, _id: Uuid) -> AppResult<()> {
        Err(AppError::not_allowed(
            "Deleting document versions is not supported",
        ))
    }

    /// The storage prefix owned by a version.
    async fn storage_path(&self, version: &DocumentVersion) -> AppResult<StoragePath> {
        let doc = self.document(version.document_id).await?;
        Ok(StoragePath::for_version(
            doc.business_unit_id,
            doc.id,
            version.id,
        ))
    }

    /// Validate an upload and sign a URL for it. Never mutates a record.
    pub async fn request_upload_url(
        &self,
        id: Uuid,
        request: UploadRequest,
    ) -> AppResult<UploadTicket> {
        self.policy.check(&request.mime_type, request.file_size)?;

        let version = self.get(id).await?;
        let key = self
            .storage_path(&version)
            .await?
            .object_key(&request.file_name, Utc::now());

        let signed = self.storage.create_signed_upload_url(&key).await?;

        info!(version_id = %id, path = %signed.path, "Upload URL issued");
        Ok(UploadTicket {
            signed_url: signed.signed_url,
            token: signed.token,
            path: signed.path,
            bucket_id: self.storage.bucket_id().to_string(),
        })
    }

    /// Record an uploaded attachment, replacing any previous one.
    pub async fn confirm_upload(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        upload: ConfirmUpload,
    ) -> AppResult<DocumentVersion> {
        let version = self.get(id).await?;
        let prefix = self.storage_path(&version).await?;
        if !prefix.contains(&upload.storage_path) {
            return Err(AppError::validation(format!(
                "Storage path must be under {prefix}"
            )));
        }
        if upload.file_size <= 0 {
            return Err(AppError::validation("File is empty"));
        }

        if let Some(previous) = version.pdf_attachment()
            && previous.key != upload.storage_path
            && let Err(e) = self.storage.remove(&previous.key).await
        {
            warn!(
                version_id = %id,
                path = %previous.key,
                error = %e,
                "Failed to delete superseded attachment"
            );
        }

        let attachment = PdfAttachment {
            key: upload.storage_path,
            file_name: upload.file_name,
            file_size: upload.file_size,
        };
        let version = self
            .versions
            .set_pdf(id, Some(&attachment))
            .await?
            .ok_or_else(|| AppError::not_found("Document version not found"))?;

        self.audit
            .record(
                ctx,
                EntityType::DocumentVersion,
                id,
                AuditAction::PdfUploaded,
                format!(
                    "Uploaded {} ({} bytes)",
                    attachment.file_name, attachment.file_size
                ),
            )
            .await?;

        info!(version_id = %id, path = %attachment.key, "Attachment confirmed");
        Ok(version)
    }

    fn require_pdf(version: &DocumentVersion) -> AppResult<PdfAttachment> {
        version
            .pdf_attachment()
            .ok_or_else(|| AppError::not_found("No PDF attached to this version"))
    }

    /// Sign a download URL for the attachment.
    pub async fn download_url(&self, id: Uuid, mode: DownloadMode) -> AppResult<SignedDownload> {
        let version = self.get(id).await?;
        let pdf = Self::require_pdf(&version)?;

        let download_name = match mode {
            DownloadMode::View => None,
            DownloadMode::Download => Some(pdf.file_name.as_str()),
        };
        let url = self
            .storage
            .create_signed_url(&pdf.key, self.download_expiry, download_name)
            .await?;

        Ok(SignedDownload {
            url,
            expires_in: self.download_expiry.as_secs(),
        })
    }

    /// Convert the attachment to markdown.
    pub async fn to_markdown(&self, id: Uuid) -> AppResult<String> {
        let version = self.get(id).await?;
        let pdf = Self::require_pdf(&version)?;

        let format = self.converter.resolve(&pdf.file_name)?;
        let url = self
            .storage
            .create_signed_url(&pdf.key, self.download_expiry, None)
            .await?;

        self.converter.fetch_and_convert(format, &url).await
    }

    /// Remove the attachment: delete the object, then clear the record.
    pub async fn delete_pdf(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let version = self.get(id).await?;
        let pdf = Self::require_pdf(&version)?;

        self.storage.remove(&pdf.key).await.map_err(|e| {
            AppError::internal(format!("Failed to delete attachment {}: {}", pdf.key, e.message))
        })?;

        self.versions
            .set_pdf(id, None)
            .await?
            .ok_or_else(|| AppError::not_found("Document version not found"))?;

        self.audit
            .record(
                ctx,
                EntityType::DocumentVersion,
                id,
                AuditAction::PdfDeleted,
                format!("Deleted {}", pdf.file_name),
            )
            .await?;

        info!(version_id = %id, path = %pdf.key, "Attachment deleted");
        Ok(())
    }
}
