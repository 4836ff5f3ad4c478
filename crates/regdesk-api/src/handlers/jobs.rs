//! AI job handlers.
//!
//! Jobs are executed by an external runner; this surface only enqueues,
//! reads and requests cancellation.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::dto::action::{JobCommand, JobParams, JobQuery};
use crate::dto::request::EnqueueJobRequest;
use crate::error::ApiResult;
use crate::extractors::ApiQuery;
use crate::extractors::json::decode;
use crate::state::AppState;

/// GET /api/ai-jobs?id=... or ?entityId=...
pub async fn query(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<JobParams>,
) -> ApiResult<Response> {
    let response = match JobQuery::try_from(&params)? {
        JobQuery::Get { id } => Json(state.job_service.get(id).await?).into_response(),
        JobQuery::ForEntity { entity_id } => {
            Json(state.job_service.list_for_entity(entity_id).await?).into_response()
        }
    };
    Ok(response)
}

/// POST /api/ai-jobs, or POST /api/ai-jobs?id=...&action=cancel
pub async fn command(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<JobParams>,
    body: Bytes,
) -> ApiResult<Response> {
    let response = match JobCommand::try_from(&params)? {
        JobCommand::Enqueue => {
            let req: EnqueueJobRequest = decode(&body)?;
            let job = state.job_service.enqueue(&req.job_type, req.entity_id).await?;
            (StatusCode::CREATED, Json(job)).into_response()
        }
        JobCommand::Cancel { id } => Json(state.job_service.cancel(id).await?).into_response(),
    };
    Ok(response)
}
