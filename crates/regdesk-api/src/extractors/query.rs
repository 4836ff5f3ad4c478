//! Query-string extraction with validation-error rejections.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use regdesk_core::error::AppError;

use crate::error::ApiError;

/// Like [`Query`], but a malformed query string is a `400` with the
/// standard error body.
#[derive(Debug, Clone)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(format!("Invalid query string: {}", e.body_text())))?;
        Ok(ApiQuery(value))
    }
}

/// Parse a UUID query parameter.
pub fn parse_uuid(name: &str, value: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(value.trim()).map_err(|_| AppError::validation(format!("Invalid {name}: {value}")))
}

/// Parse a required UUID query parameter.
pub fn require_uuid(name: &str, value: Option<&str>) -> Result<Uuid, AppError> {
    let value = value.ok_or_else(|| AppError::validation(format!("{name} is required")))?;
    parse_uuid(name, value)
}

/// Parse an optional UUID query parameter.
pub fn optional_uuid(name: &str, value: Option<&str>) -> Result<Option<Uuid>, AppError> {
    value.map(|v| parse_uuid(name, v)).transpose()
}
