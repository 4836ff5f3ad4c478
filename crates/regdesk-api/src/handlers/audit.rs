//! Audit log handlers (read-only).

use axum::Json;
use axum::extract::State;

use regdesk_core::types::pagination::PageResponse;
use regdesk_entity::AuditLogEntry;
use regdesk_service::audit::AuditFilter;

use crate::dto::request::AuditParams;
use crate::error::ApiResult;
use crate::extractors::{ApiQuery, PaginationParams, optional_uuid};
use crate::state::AppState;

/// GET /api/audit-logs?entityType=&entityId=&page=&perPage=
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<AuditParams>,
    ApiQuery(pagination): ApiQuery<PaginationParams>,
) -> ApiResult<Json<PageResponse<AuditLogEntry>>> {
    let filter = AuditFilter {
        entity_type: params
            .entity_type
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()),
        entity_id: optional_uuid("entityId", params.entity_id.as_deref())?,
    };

    let page = state
        .audit_service
        .search(&filter, pagination.into_page_request())
        .await?;
    Ok(Json(page))
}
