//! Knowledge-base article repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use regdesk_core::error::{AppError, ErrorKind};
use regdesk_core::result::AppResult;
use regdesk_core::types::pagination::{PageRequest, PageResponse};
use regdesk_entity::KnowledgeArticle;

use crate::store::Repository;

/// Repository for knowledge-base articles.
#[derive(Debug, Clone)]
pub struct KnowledgeArticleRepository {
    pool: PgPool,
}

impl KnowledgeArticleRepository {
    /// Create a new knowledge article repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<KnowledgeArticle> for KnowledgeArticleRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<KnowledgeArticle>> {
        sqlx::query_as::<_, KnowledgeArticle>("SELECT * FROM knowledge_articles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find knowledge article", e)
            })
    }

    async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<KnowledgeArticle>> {
        let total = super::count_all(&self.pool, "knowledge_articles").await?;

        let items = sqlx::query_as::<_, KnowledgeArticle>(
            "SELECT * FROM knowledge_articles ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list knowledge articles", e)
        })?;

        Ok(PageResponse::new(items, page, total as u64))
    }

    async fn insert(&self, a: &KnowledgeArticle) -> AppResult<KnowledgeArticle> {
        sqlx::query_as::<_, KnowledgeArticle>(
            "INSERT INTO knowledge_articles (id, title, body, category, tags, published, created_by, \
             created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(a.id)
        .bind(&a.title)
        .bind(&a.body)
        .bind(&a.category)
        .bind(&a.tags)
        .bind(a.published)
        .bind(&a.created_by)
        .bind(a.created_at)
        .bind(a.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create knowledge article", e)
        })
    }

    async fn update(&self, a: &KnowledgeArticle) -> AppResult<Option<KnowledgeArticle>> {
        sqlx::query_as::<_, KnowledgeArticle>(
            "UPDATE knowledge_articles SET title = $2, body = $3, category = $4, tags = $5, \
             published = $6, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(a.id)
        .bind(&a.title)
        .bind(&a.body)
        .bind(&a.category)
        .bind(&a.tags)
        .bind(a.published)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update knowledge article", e)
        })
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        super::delete_by_id(&self.pool, "knowledge_articles", id).await
    }
}
