//! Document version repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use regdesk_core::error::{AppError, ErrorKind};
use regdesk_core::result::AppResult;
use regdesk_entity::{DocumentVersion, PdfAttachment, VersionStatus};

use crate::store::DocumentVersionStore;

/// Repository for document versions.
#[derive(Debug, Clone)]
pub struct DocumentVersionRepository {
    pool: PgPool,
}

impl DocumentVersionRepository {
    /// Create a new document version repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentVersionStore for DocumentVersionRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<DocumentVersion>> {
        sqlx::query_as::<_, DocumentVersion>("SELECT * FROM document_versions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find document version", e)
            })
    }

    async fn find_by_document(&self, document_id: Uuid) -> AppResult<Vec<DocumentVersion>> {
        sqlx::query_as::<_, DocumentVersion>(
            "SELECT * FROM document_versions WHERE document_id = $1 ORDER BY created_at DESC",
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list document versions", e)
        })
    }

    async fn insert(&self, v: &DocumentVersion) -> AppResult<DocumentVersion> {
        sqlx::query_as::<_, DocumentVersion>(
            "INSERT INTO document_versions (id, document_id, version, status, content, content_hash, \
             pdf_s3_key, pdf_file_name, pdf_file_size, effective_date, created_by, change_reason, \
             created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) RETURNING *",
        )
        .bind(v.id)
        .bind(v.document_id)
        .bind(&v.version)
        .bind(v.status)
        .bind(&v.content)
        .bind(&v.content_hash)
        .bind(&v.pdf_s3_key)
        .bind(&v.pdf_file_name)
        .bind(v.pdf_file_size)
        .bind(v.effective_date)
        .bind(&v.created_by)
        .bind(&v.change_reason)
        .bind(v.created_at)
        .bind(v.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create document version", e)
        })
    }

    async fn update_metadata(&self, v: &DocumentVersion) -> AppResult<Option<DocumentVersion>> {
        sqlx::query_as::<_, DocumentVersion>(
            "UPDATE document_versions SET version = $2, content = $3, effective_date = $4, \
             change_reason = $5, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(v.id)
        .bind(&v.version)
        .bind(&v.content)
        .bind(v.effective_date)
        .bind(&v.change_reason)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update document version", e)
        })
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: VersionStatus,
    ) -> AppResult<Option<DocumentVersion>> {
        sqlx::query_as::<_, DocumentVersion>(
            "UPDATE document_versions SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update version status", e)
        })
    }

    async fn set_pdf(
        &self,
        id: Uuid,
        attachment: Option<&PdfAttachment>,
    ) -> AppResult<Option<DocumentVersion>> {
        sqlx::query_as::<_, DocumentVersion>(
            "UPDATE document_versions SET pdf_s3_key = $2, pdf_file_name = $3, pdf_file_size = $4, \
             updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(attachment.map(|a| a.key.as_str()))
        .bind(attachment.map(|a| a.file_name.as_str()))
        .bind(attachment.map(|a| a.file_size))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update version attachment", e)
        })
    }
}
