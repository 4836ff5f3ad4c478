//! JSON body extraction followed by `validator` checks.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use regdesk_core::error::AppError;

use crate::error::{ApiError, from_validation};

/// A JSON body that deserialized and passed `Validate`.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(format!("Invalid request body: {}", e.body_text())))?;
        value.validate().map_err(from_validation)?;
        Ok(ValidatedJson(value))
    }
}

/// Decode and validate a raw JSON body.
///
/// Used by handlers whose body shape depends on the `action` parameter.
pub fn decode<T>(body: &[u8]) -> Result<T, AppError>
where
    T: DeserializeOwned + Validate,
{
    let value: T = serde_json::from_slice(body)
        .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?;
    value.validate().map_err(from_validation)?;
    Ok(value)
}
