//! Audit trail service.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use regdesk_core::result::AppResult;
use regdesk_core::types::pagination::{PageRequest, PageResponse};
use regdesk_database::AuditLogStore;
use regdesk_entity::{AuditAction, AuditLogEntry, EntityType, NewAuditLogEntry};

use crate::context::RequestContext;

/// Filter for audit log searches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditFilter {
    /// Restrict to one entity type (e.g., `"document_version"`).
    pub entity_type: Option<String>,
    /// Restrict to one entity.
    pub entity_id: Option<Uuid>,
}

/// Appends and searches audit entries.
#[derive(Debug, Clone)]
pub struct AuditService {
    store: Arc<dyn AuditLogStore>,
}

impl AuditService {
    /// Creates a new audit service.
    pub fn new(store: Arc<dyn AuditLogStore>) -> Self {
        Self { store }
    }

    /// Append one entry for an action performed by the request's actor.
    pub async fn record(
        &self,
        ctx: &RequestContext,
        entity_type: EntityType,
        entity_id: Uuid,
        action: AuditAction,
        details: impl Into<String>,
    ) -> AppResult<AuditLogEntry> {
        let entry = self
            .store
            .append(NewAuditLogEntry::new(
                entity_type,
                entity_id,
                action,
                ctx.actor.clone(),
                details,
            ))
            .await?;
        debug!(
            entity_type = %entry.entity_type,
            entity_id = %entry.entity_id,
            action = %entry.action,
            actor = %entry.actor,
            "Audit entry recorded"
        );
        Ok(entry)
    }

    /// Search entries, newest first.
    pub async fn search(
        &self,
        filter: &AuditFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<AuditLogEntry>> {
        self.store
            .search(filter.entity_type.as_deref(), filter.entity_id, &page)
            .await
    }
}
