//! Document CRUD handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use regdesk_entity::Document;
use regdesk_service::document::{DocumentPatch, NewDocument};

use crate::dto::request::{CreateDocumentRequest, DocumentParams, UpdateDocumentRequest};
use crate::error::ApiResult;
use crate::extractors::{
    Actor, ApiQuery, PaginationParams, ValidatedJson, optional_uuid, require_uuid,
};
use crate::state::AppState;

/// GET /api/documents?id=... or ?businessUnitId=...&page=&perPage=
pub async fn query(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<DocumentParams>,
    ApiQuery(pagination): ApiQuery<PaginationParams>,
) -> ApiResult<Response> {
    if let Some(id) = params.id.as_deref() {
        let id = require_uuid("id", Some(id))?;
        return Ok(Json(state.document_service.get(id).await?).into_response());
    }

    let business_unit = optional_uuid("businessUnitId", params.business_unit_id.as_deref())?;
    let page = state
        .document_service
        .list(business_unit, pagination.into_page_request())
        .await?;
    Ok(Json(page).into_response())
}

/// POST /api/documents
pub async fn create(
    State(state): State<AppState>,
    actor: Actor,
    ValidatedJson(req): ValidatedJson<CreateDocumentRequest>,
) -> ApiResult<(StatusCode, Json<Document>)> {
    let doc = state
        .document_service
        .create(
            &actor,
            NewDocument {
                business_unit_id: req.business_unit_id,
                title: req.title,
                category: req.category,
                description: req.description,
                owner: req.owner,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(doc)))
}

/// PUT /api/documents?id=...
pub async fn update(
    State(state): State<AppState>,
    actor: Actor,
    ApiQuery(params): ApiQuery<DocumentParams>,
    ValidatedJson(req): ValidatedJson<UpdateDocumentRequest>,
) -> ApiResult<Json<Document>> {
    let id = require_uuid("id", params.id.as_deref())?;
    let doc = state
        .document_service
        .update(
            &actor,
            id,
            DocumentPatch {
                title: req.title,
                category: req.category,
                description: req.description,
                owner: req.owner,
            },
        )
        .await?;
    Ok(Json(doc))
}

/// DELETE /api/documents?id=...
pub async fn remove(
    State(state): State<AppState>,
    actor: Actor,
    ApiQuery(params): ApiQuery<DocumentParams>,
) -> ApiResult<StatusCode> {
    let id = require_uuid("id", params.id.as_deref())?;
    state.document_service.delete(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
