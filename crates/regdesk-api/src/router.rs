//! Route definitions for the RegDesk HTTP API.
//!
//! All routes are organized by resource and mounted under `/api`.

use axum::Router;
use axum::routing::{get, post};

use regdesk_entity::{Finding, KnowledgeArticle, Requirement, Risk};

use crate::handlers::{self, register};
use crate::state::AppState;

/// Build the `/api` router with every resource.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(document_routes())
        .merge(register_routes())
        .merge(audit_routes())
        .merge(job_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Documents and document versions
fn document_routes() -> Router<AppState> {
    use handlers::{convert, documents, versions};

    Router::new()
        .route(
            "/documents",
            get(documents::query)
                .post(documents::create)
                .put(documents::update)
                .delete(documents::remove),
        )
        .route(
            "/document-versions",
            get(versions::query)
                .post(versions::command)
                .put(versions::update)
                .delete(versions::remove),
        )
        .route("/markitdown-convert", post(convert::convert))
}

fn register_route<R: register::RegisterResource>(path: &str) -> Router<AppState> {
    Router::new().route(
        path,
        get(register::query::<R>)
            .post(register::create::<R>)
            .put(register::update::<R>)
            .delete(register::remove::<R>),
    )
}

/// Requirements, findings, knowledge base, risks
fn register_routes() -> Router<AppState> {
    Router::new()
        .merge(register_route::<Requirement>("/requirements"))
        .merge(register_route::<Finding>("/findings"))
        .merge(register_route::<KnowledgeArticle>("/knowledge-base"))
        .merge(register_route::<Risk>("/risks"))
}

/// Audit log (read-only)
fn audit_routes() -> Router<AppState> {
    Router::new().route("/audit-logs", get(handlers::audit::list))
}

/// AI jobs
fn job_routes() -> Router<AppState> {
    Router::new().route(
        "/ai-jobs",
        get(handlers::jobs::query).post(handlers::jobs::command),
    )
}

/// Health
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use regdesk_convert::{HttpFetcher, MarkdownConverter};
    use regdesk_core::config::{AppConfig, ConversionConfig};
    use regdesk_storage::MemoryObjectStorage;

    use crate::state::Stores;

    fn state() -> AppState {
        let config: AppConfig =
            serde_json::from_value(serde_json::json!({ "database": { "url": "" } })).unwrap();
        let fetcher = HttpFetcher::new(&ConversionConfig::default()).unwrap();
        AppState::new(
            config,
            None,
            Stores::in_memory(),
            Arc::new(MemoryObjectStorage::new("compliance-documents")),
            Arc::new(MarkdownConverter::new(Arc::new(fetcher))),
        )
    }

    #[tokio::test]
    async fn test_health_without_database() {
        let resp = build_router(state())
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_action_is_bad_request() {
        let uri = format!(
            "/api/document-versions?id={}&action=publish",
            uuid::Uuid::new_v4()
        );
        let resp = build_router(state())
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unrouted_method_is_405() {
        let resp = build_router(state())
            .oneshot(
                Request::patch("/api/documents")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
