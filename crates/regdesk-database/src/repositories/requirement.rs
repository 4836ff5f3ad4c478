//! Regulatory requirement repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use regdesk_core::error::{AppError, ErrorKind};
use regdesk_core::result::AppResult;
use regdesk_core::types::pagination::{PageRequest, PageResponse};
use regdesk_entity::Requirement;

use crate::store::Repository;

/// Repository for regulatory requirements.
#[derive(Debug, Clone)]
pub struct RequirementRepository {
    pool: PgPool,
}

impl RequirementRepository {
    /// Create a new requirement repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Requirement> for RequirementRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Requirement>> {
        sqlx::query_as::<_, Requirement>("SELECT * FROM requirements WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find requirement", e)
            })
    }

    async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Requirement>> {
        let total = super::count_all(&self.pool, "requirements").await?;

        let items = sqlx::query_as::<_, Requirement>(
            "SELECT * FROM requirements ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list requirements", e))?;

        Ok(PageResponse::new(items, page, total as u64))
    }

    async fn insert(&self, r: &Requirement) -> AppResult<Requirement> {
        sqlx::query_as::<_, Requirement>(
            "INSERT INTO requirements (id, reference, title, description, source, category, status, \
             owner, due_date, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING *",
        )
        .bind(r.id)
        .bind(&r.reference)
        .bind(&r.title)
        .bind(&r.description)
        .bind(&r.source)
        .bind(&r.category)
        .bind(r.status)
        .bind(&r.owner)
        .bind(r.due_date)
        .bind(r.created_at)
        .bind(r.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create requirement", e))
    }

    async fn update(&self, r: &Requirement) -> AppResult<Option<Requirement>> {
        sqlx::query_as::<_, Requirement>(
            "UPDATE requirements SET reference = $2, title = $3, description = $4, source = $5, \
             category = $6, status = $7, owner = $8, due_date = $9, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(r.id)
        .bind(&r.reference)
        .bind(&r.title)
        .bind(&r.description)
        .bind(&r.source)
        .bind(&r.category)
        .bind(r.status)
        .bind(&r.owner)
        .bind(r.due_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update requirement", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        super::delete_by_id(&self.pool, "requirements", id).await
    }
}
