//! Audit finding repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use regdesk_core::error::{AppError, ErrorKind};
use regdesk_core::result::AppResult;
use regdesk_core::types::pagination::{PageRequest, PageResponse};
use regdesk_entity::Finding;

use crate::store::Repository;

/// Repository for audit findings.
#[derive(Debug, Clone)]
pub struct FindingRepository {
    pool: PgPool,
}

impl FindingRepository {
    /// Create a new finding repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Finding> for FindingRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Finding>> {
        sqlx::query_as::<_, Finding>("SELECT * FROM findings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find finding", e))
    }

    async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Finding>> {
        let total = super::count_all(&self.pool, "findings").await?;

        let items = sqlx::query_as::<_, Finding>(
            "SELECT * FROM findings ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list findings", e))?;

        Ok(PageResponse::new(items, page, total as u64))
    }

    async fn insert(&self, f: &Finding) -> AppResult<Finding> {
        sqlx::query_as::<_, Finding>(
            "INSERT INTO findings (id, title, description, severity, status, requirement_id, \
             raised_by, due_date, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
        )
        .bind(f.id)
        .bind(&f.title)
        .bind(&f.description)
        .bind(f.severity)
        .bind(f.status)
        .bind(f.requirement_id)
        .bind(&f.raised_by)
        .bind(f.due_date)
        .bind(f.created_at)
        .bind(f.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create finding", e))
    }

    async fn update(&self, f: &Finding) -> AppResult<Option<Finding>> {
        sqlx::query_as::<_, Finding>(
            "UPDATE findings SET title = $2, description = $3, severity = $4, status = $5, \
             requirement_id = $6, due_date = $7, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(f.id)
        .bind(&f.title)
        .bind(&f.description)
        .bind(f.severity)
        .bind(f.status)
        .bind(f.requirement_id)
        .bind(f.due_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update finding", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        super::delete_by_id(&self.pool, "findings", id).await
    }
}
