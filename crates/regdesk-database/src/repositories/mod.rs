//! PostgreSQL repository implementations for all RegDesk entities.

pub mod audit;
pub mod document;
pub mod finding;
pub mod job;
pub mod knowledge;
pub mod requirement;
pub mod risk;
pub mod version;

pub use audit::AuditLogRepository;
pub use document::DocumentRepository;
pub use finding::FindingRepository;
pub use job::AiJobRepository;
pub use knowledge::KnowledgeArticleRepository;
pub use requirement::RequirementRepository;
pub use risk::RiskRepository;
pub use version::DocumentVersionRepository;

use sqlx::PgPool;

use regdesk_core::error::{AppError, ErrorKind};
use regdesk_core::result::AppResult;

/// Delete a row by id from `table`, returning whether a row was removed.
pub(crate) async fn delete_by_id(
    pool: &PgPool,
    table: &'static str,
    id: uuid::Uuid,
) -> AppResult<bool> {
    let sql = format!("DELETE FROM {table} WHERE id = $1");
    let result = sqlx::query(&sql)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, format!("Failed to delete from {table}"), e)
        })?;
    Ok(result.rows_affected() > 0)
}

/// Count the rows of `table`.
pub(crate) async fn count_all(pool: &PgPool, table: &'static str) -> AppResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    sqlx::query_scalar::<_, i64>(&sql)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, format!("Failed to count {table}"), e)
        })
}
