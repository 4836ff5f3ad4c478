//! Document repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use regdesk_core::error::{AppError, ErrorKind};
use regdesk_core::result::AppResult;
use regdesk_core::types::pagination::{PageRequest, PageResponse};
use regdesk_entity::Document;

use crate::store::{DocumentStore, Repository};

/// Repository for documents.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Document> for DocumentRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find document", e))
    }

    async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Document>> {
        let total = super::count_all(&self.pool, "documents").await?;

        let docs = sqlx::query_as::<_, Document>(
            "SELECT * FROM documents ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documents", e))?;

        Ok(PageResponse::new(docs, page, total as u64))
    }

    async fn insert(&self, doc: &Document) -> AppResult<Document> {
        sqlx::query_as::<_, Document>(
            "INSERT INTO documents (id, business_unit_id, title, category, description, owner, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(doc.id)
        .bind(doc.business_unit_id)
        .bind(&doc.title)
        .bind(&doc.category)
        .bind(&doc.description)
        .bind(&doc.owner)
        .bind(doc.created_at)
        .bind(doc.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create document", e))
    }

    async fn update(&self, doc: &Document) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>(
            "UPDATE documents SET title = $2, category = $3, description = $4, owner = $5, \
             updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(doc.id)
        .bind(&doc.title)
        .bind(&doc.category)
        .bind(&doc.description)
        .bind(&doc.owner)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update document", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        super::delete_by_id(&self.pool, "documents", id).await
    }
}

#[async_trait]
impl DocumentStore for DocumentRepository {
    async fn find_by_business_unit(
        &self,
        business_unit_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Document>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE business_unit_id = $1")
                .bind(business_unit_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count documents", e)
                })?;

        let docs = sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE business_unit_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(business_unit_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to list documents by business unit",
                e,
            )
        })?;

        Ok(PageResponse::new(docs, page, total as u64))
    }
}
