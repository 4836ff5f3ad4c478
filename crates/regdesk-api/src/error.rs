//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use validator::ValidationErrors;

use regdesk_core::error::{AppError, ErrorKind};
use regdesk_core::types::response::ApiErrorResponse;

/// Message sent for every 5xx response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Status code and machine-readable code for an error kind.
pub fn status_of(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::Validation | ErrorKind::Serialization => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        }
        ErrorKind::Unsupported => (StatusCode::BAD_REQUEST, "UNSUPPORTED"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::NotAllowed => (StatusCode::METHOD_NOT_ALLOWED, "METHOD_NOT_ALLOWED"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Storage
        | ErrorKind::Configuration
        | ErrorKind::ExternalService => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

/// Response wrapper so `AppError` can be returned from handlers.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, code) = status_of(err.kind);

        let message = if !err.kind.is_client_error() {
            tracing::error!(
                kind = %err.kind,
                error = %err.message,
                source = ?std::error::Error::source(&err),
                "Internal server error"
            );
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            err.message
        };

        let body = ApiErrorResponse {
            error: code.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

/// Result type returned by every handler.
pub type ApiResult<T> = Result<T, ApiError>;

/// Flatten `validator` failures into one validation error.
pub fn from_validation(errors: ValidationErrors) -> AppError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();

    if messages.is_empty() {
        AppError::validation("Invalid request")
    } else {
        AppError::validation(messages.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_keep_their_status() {
        assert_eq!(status_of(ErrorKind::Validation).0, StatusCode::BAD_REQUEST);
        assert_eq!(status_of(ErrorKind::Unsupported).0, StatusCode::BAD_REQUEST);
        assert_eq!(status_of(ErrorKind::NotFound).0, StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(ErrorKind::NotAllowed).0,
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(status_of(ErrorKind::Conflict).0, StatusCode::CONFLICT);
    }

    #[test]
    fn test_status_agrees_with_kind() {
        for kind in [
            ErrorKind::NotFound,
            ErrorKind::Validation,
            ErrorKind::Unsupported,
            ErrorKind::NotAllowed,
            ErrorKind::Conflict,
            ErrorKind::Internal,
            ErrorKind::Database,
            ErrorKind::Storage,
            ErrorKind::Configuration,
            ErrorKind::Serialization,
            ErrorKind::ExternalService,
        ] {
            assert_eq!(status_of(kind).0.is_client_error(), kind.is_client_error(), "{kind}");
        }
    }

    #[test]
    fn test_adapter_failures_are_internal() {
        for kind in [
            ErrorKind::Database,
            ErrorKind::Storage,
            ErrorKind::ExternalService,
            ErrorKind::Configuration,
        ] {
            assert_eq!(status_of(kind), (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"));
        }
    }

    #[tokio::test]
    async fn test_internal_response_hides_message() {
        let resp = ApiError(AppError::storage("bucket credentials rejected")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(resp.into_body(), 64 * 1024)
            .await
            .unwrap();
        let raw = String::from_utf8_lossy(&bytes);
        assert!(!raw.contains("bucket credentials rejected"));

        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "error": "INTERNAL_ERROR", "message": "Internal server error" })
        );
    }

    #[tokio::test]
    async fn test_client_response_keeps_message() {
        let resp = ApiError(AppError::not_found("Document not found")).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(resp.into_body(), 64 * 1024)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "NOT_FOUND");
        assert_eq!(body["message"], "Document not found");
    }
}
