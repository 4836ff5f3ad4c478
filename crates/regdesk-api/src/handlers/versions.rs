//! Document version handlers.
//!
//! Every method parses `?action=` into its command enum first; the body is
//! decoded only once the command is known.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{ACCEPT, LOCATION};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use regdesk_service::document::{ConfirmUpload, NewVersion, UploadRequest, VersionPatch};

use crate::dto::action::{VersionCommand, VersionParams, VersionQuery, VersionRemoval, VersionUpdate};
use crate::dto::request::{
    ConfirmUploadRequest, CreateVersionRequest, UpdateStatusRequest, UpdateVersionRequest,
    UploadUrlRequest,
};
use crate::dto::response::MarkdownResponse;
use crate::error::ApiResult;
use crate::extractors::json::decode;
use crate::extractors::{Actor, ApiQuery};
use crate::state::AppState;

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get_all(ACCEPT)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.contains("application/json"))
}

/// GET /api/document-versions
pub async fn query(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiQuery(params): ApiQuery<VersionParams>,
) -> ApiResult<Response> {
    let versions = &state.version_service;

    let response = match VersionQuery::try_from(&params)? {
        VersionQuery::List { document_id } => Json(versions.list(document_id).await?).into_response(),
        VersionQuery::Get { id } => Json(versions.get(id).await?).into_response(),
        VersionQuery::Download { id, mode } => {
            let signed = versions.download_url(id, mode).await?;
            if wants_json(&headers) {
                Json(signed).into_response()
            } else {
                (StatusCode::FOUND, [(LOCATION, signed.url)]).into_response()
            }
        }
        VersionQuery::ToMarkdown { id } => {
            let markdown = versions.to_markdown(id).await?;
            Json(MarkdownResponse { markdown }).into_response()
        }
    };
    Ok(response)
}

/// POST /api/document-versions
pub async fn command(
    State(state): State<AppState>,
    actor: Actor,
    ApiQuery(params): ApiQuery<VersionParams>,
    body: Bytes,
) -> ApiResult<Response> {
    let versions = &state.version_service;

    let response = match VersionCommand::try_from(&params)? {
        VersionCommand::Create => {
            let req: CreateVersionRequest = decode(&body)?;
            let version = versions
                .create(
                    &actor,
                    NewVersion {
                        document_id: req.document_id,
                        version: req.version,
                        status: req.status,
                        content: req.content,
                        effective_date: req.effective_date,
                        change_reason: req.change_reason,
                    },
                )
                .await?;
            (StatusCode::CREATED, Json(version)).into_response()
        }
        VersionCommand::UploadUrl { id } => {
            let req: UploadUrlRequest = decode(&body)?;
            let ticket = versions
                .request_upload_url(
                    id,
                    UploadRequest {
                        file_name: req.file_name,
                        mime_type: req.mime_type,
                        file_size: req.file_size,
                    },
                )
                .await?;
            Json(ticket).into_response()
        }
        VersionCommand::ConfirmUpload { id } => {
            let req: ConfirmUploadRequest = decode(&body)?;
            let version = versions
                .confirm_upload(
                    &actor,
                    id,
                    ConfirmUpload {
                        storage_path: req.storage_path,
                        file_name: req.file_name,
                        file_size: req.file_size,
                    },
                )
                .await?;
            Json(version).into_response()
        }
    };
    Ok(response)
}

/// PUT /api/document-versions
pub async fn update(
    State(state): State<AppState>,
    actor: Actor,
    ApiQuery(params): ApiQuery<VersionParams>,
    body: Bytes,
) -> ApiResult<Response> {
    let versions = &state.version_service;

    let version = match VersionUpdate::try_from(&params)? {
        VersionUpdate::Metadata { id } => {
            let req: UpdateVersionRequest = decode(&body)?;
            let patch = VersionPatch {
                version: req.version,
                content: req.content,
                effective_date: req.effective_date,
                change_reason: req.change_reason,
            };
            versions.update_metadata(&actor, id, patch).await?
        }
        VersionUpdate::Status { id } => {
            let req: UpdateStatusRequest = decode(&body)?;
            versions.update_status(&actor, id, req.status).await?
        }
    };
    Ok(Json(version).into_response())
}

/// DELETE /api/document-versions
pub async fn remove(
    State(state): State<AppState>,
    actor: Actor,
    ApiQuery(params): ApiQuery<VersionParams>,
) -> ApiResult<StatusCode> {
    match VersionRemoval::try_from(&params)? {
        VersionRemoval::Version { id } => state.version_service.delete(id).await?,
        VersionRemoval::Pdf { id } => state.version_service.delete_pdf(&actor, id).await?,
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_wants_json_matches_any_accept_value() {
        let mut headers = HeaderMap::new();
        assert!(!wants_json(&headers));

        headers.insert(ACCEPT, HeaderValue::from_static("text/html"));
        assert!(!wants_json(&headers));

        headers.append(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain;q=0.5"),
        );
        assert!(wants_json(&headers));
    }
}
