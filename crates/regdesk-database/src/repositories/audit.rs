//! Audit log repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use regdesk_core::error::{AppError, ErrorKind};
use regdesk_core::result::AppResult;
use regdesk_core::types::pagination::{PageRequest, PageResponse};
use regdesk_entity::{AuditLogEntry, NewAuditLogEntry};

use crate::store::AuditLogStore;

/// Repository for audit log entries. Rows are only ever inserted.
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    pool: PgPool,
}

impl AuditLogRepository {
    /// Create a new audit log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogStore for AuditLogRepository {
    async fn append(&self, entry: NewAuditLogEntry) -> AppResult<AuditLogEntry> {
        let row = entry.into_entry();
        sqlx::query_as::<_, AuditLogEntry>(
            "INSERT INTO audit_log (id, entity_type, entity_id, action, actor, details, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(row.id)
        .bind(&row.entity_type)
        .bind(row.entity_id)
        .bind(&row.action)
        .bind(&row.actor)
        .bind(&row.details)
        .bind(row.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create audit entry", e))
    }

    async fn search(
        &self,
        entity_type: Option<&str>,
        entity_id: Option<Uuid>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AuditLogEntry>> {
        let mut conditions = Vec::new();
        let mut param_idx = 1u32;

        if entity_type.is_some() {
            conditions.push(format!("entity_type = ${param_idx}"));
            param_idx += 1;
        }
        if entity_id.is_some() {
            conditions.push(format!("entity_id = ${param_idx}"));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM audit_log {where_clause}");
        let select_sql = format!(
            "SELECT * FROM audit_log {where_clause} ORDER BY created_at DESC LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, AuditLogEntry>(&select_sql);

        if let Some(et) = entity_type {
            count_query = count_query.bind(et.to_string());
            select_query = select_query.bind(et.to_string());
        }
        if let Some(eid) = entity_id {
            count_query = count_query.bind(eid);
            select_query = select_query.bind(eid);
        }

        let total = count_query.fetch_one(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count audit entries", e)
        })?;

        let entries = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to search audit log", e)
            })?;

        Ok(PageResponse::new(entries, page, total as u64))
    }
}
