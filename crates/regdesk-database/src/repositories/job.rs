//! AI job repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use regdesk_core::error::{AppError, ErrorKind};
use regdesk_core::result::AppResult;
use regdesk_entity::AiJob;

use crate::store::AiJobStore;

/// Repository for AI jobs.
#[derive(Debug, Clone)]
pub struct AiJobRepository {
    pool: PgPool,
}

impl AiJobRepository {
    /// Create a new AI job repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AiJobStore for AiJobRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<AiJob>> {
        sqlx::query_as::<_, AiJob>("SELECT * FROM ai_jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find AI job", e))
    }

    async fn find_by_entity(&self, entity_id: Uuid) -> AppResult<Vec<AiJob>> {
        sqlx::query_as::<_, AiJob>(
            "SELECT * FROM ai_jobs WHERE entity_id = $1 ORDER BY created_at DESC",
        )
        .bind(entity_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list AI jobs", e))
    }

    async fn insert(&self, job: &AiJob) -> AppResult<AiJob> {
        sqlx::query_as::<_, AiJob>(
            "INSERT INTO ai_jobs (id, job_type, entity_id, status, progress_message, result, \
             error_message, created_at, updated_at, completed_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
        )
        .bind(job.id)
        .bind(&job.job_type)
        .bind(job.entity_id)
        .bind(job.status)
        .bind(&job.progress_message)
        .bind(&job.result)
        .bind(&job.error_message)
        .bind(job.created_at)
        .bind(job.updated_at)
        .bind(job.completed_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create AI job", e))
    }

    async fn cancel(&self, id: Uuid) -> AppResult<Option<AiJob>> {
        sqlx::query_as::<_, AiJob>(
            "UPDATE ai_jobs SET status = 'cancelled', updated_at = NOW(), completed_at = NOW() \
             WHERE id = $1 AND status IN ('pending', 'processing') RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to cancel AI job", e))
    }
}
