//! Risk register repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use regdesk_core::error::{AppError, ErrorKind};
use regdesk_core::result::AppResult;
use regdesk_core::types::pagination::{PageRequest, PageResponse};
use regdesk_entity::Risk;

use crate::store::Repository;

/// Repository for the risk register.
#[derive(Debug, Clone)]
pub struct RiskRepository {
    pool: PgPool,
}

impl RiskRepository {
    /// Create a new risk repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Risk> for RiskRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Risk>> {
        sqlx::query_as::<_, Risk>("SELECT * FROM risks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find risk", e))
    }

    async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Risk>> {
        let total = super::count_all(&self.pool, "risks").await?;

        let items = sqlx::query_as::<_, Risk>(
            "SELECT * FROM risks ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list risks", e))?;

        Ok(PageResponse::new(items, page, total as u64))
    }

    async fn insert(&self, r: &Risk) -> AppResult<Risk> {
        sqlx::query_as::<_, Risk>(
            "INSERT INTO risks (id, title, description, category, likelihood, impact, owner, status, \
             mitigation, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING *",
        )
        .bind(r.id)
        .bind(&r.title)
        .bind(&r.description)
        .bind(&r.category)
        .bind(r.likelihood)
        .bind(r.impact)
        .bind(&r.owner)
        .bind(r.status)
        .bind(&r.mitigation)
        .bind(r.created_at)
        .bind(r.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create risk", e))
    }

    async fn update(&self, r: &Risk) -> AppResult<Option<Risk>> {
        sqlx::query_as::<_, Risk>(
            "UPDATE risks SET title = $2, description = $3, category = $4, likelihood = $5, \
             impact = $6, owner = $7, status = $8, mitigation = $9, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(r.id)
        .bind(&r.title)
        .bind(&r.description)
        .bind(&r.category)
        .bind(r.likelihood)
        .bind(r.impact)
        .bind(&r.owner)
        .bind(r.status)
        .bind(&r.mitigation)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update risk", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        super::delete_by_id(&self.pool, "risks", id).await
    }
}
