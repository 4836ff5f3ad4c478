//! Standalone markdown conversion handler.

use axum::Json;
use axum::extract::State;

use regdesk_core::error::AppError;

use crate::dto::request::ConvertRequest;
use crate::dto::response::MarkdownResponse;
use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/markitdown-convert
pub async fn convert(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ConvertRequest>,
) -> ApiResult<Json<MarkdownResponse>> {
    let url = req
        .url
        .ok_or_else(|| AppError::validation("url is required"))?;
    let file_name = req
        .filename
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| ConvertRequest::DEFAULT_FILENAME.to_string());

    let markdown = state.converter.convert_url(&url, &file_name).await?;
    Ok(Json(MarkdownResponse { markdown }))
}
