//! Shared test helpers for integration tests.
//!
//! The application runs over in-memory stores and in-memory object storage.
//! Markdown conversion fetches straight out of that bucket, and PDF text
//! extraction is replaced by a canned extractor.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use bytes::Bytes;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use regdesk_api::{AppState, Stores, build_app};
use regdesk_convert::{MarkdownConverter, SourceFormat};
use regdesk_core::config::AppConfig;
use regdesk_core::error::AppError;
use regdesk_core::result::AppResult;
use regdesk_core::traits::{ContentFetcher, TextExtractor};
use regdesk_database::memory::MemoryTable;
use regdesk_entity::{AiJob, AuditLogEntry};
use regdesk_storage::MemoryObjectStorage;

/// Email sent in `x-user-email` by [`TestApp::request`].
pub const OFFICER: &str = "officer@bank.test";

/// Text produced by the canned PDF extractor.
pub const PDF_TEXT: &str = "# Anti-Money Laundering Policy\n\nAll customers are screened.";

/// Serves objects out of the in-memory bucket and counts calls.
#[derive(Debug)]
pub struct BucketFetcher {
    storage: MemoryObjectStorage,
    calls: AtomicUsize,
}

impl BucketFetcher {
    /// Number of fetches so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentFetcher for BucketFetcher {
    async fn fetch(&self, url: &str) -> AppResult<Bytes> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.storage
            .object_at_url(url)
            .await
            .ok_or_else(|| AppError::external_service(format!("Nothing at {url}")))
    }
}

#[derive(Debug)]
struct CannedPdf;

impl TextExtractor for CannedPdf {
    fn name(&self) -> &'static str {
        "canned-pdf"
    }

    fn extract(&self, bytes: &[u8]) -> AppResult<String> {
        if bytes.starts_with(b"%PDF") {
            Ok(PDF_TEXT.to_string())
        } else {
            Err(AppError::unsupported("Not a PDF"))
        }
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Object storage behind the version service
    pub storage: MemoryObjectStorage,
    /// Fetcher used by markdown conversion
    pub fetcher: Arc<BucketFetcher>,
    /// Audit table, for direct inspection
    pub audit: Arc<MemoryTable<AuditLogEntry>>,
    /// AI job table, written by the "runner" in tests
    pub jobs: Arc<MemoryTable<AiJob>>,
    /// Application config
    pub config: AppConfig,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body (`Null` when empty or not JSON)
    pub body: Value,
}

impl TestResponse {
    /// A string field of the body.
    pub fn str(&self, field: &str) -> &str {
        self.body[field].as_str().unwrap_or_default()
    }

    /// The `id` field of the body as a UUID.
    pub fn id(&self) -> Uuid {
        Uuid::parse_str(self.str("id")).expect("response has an id")
    }
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let config: AppConfig = serde_json::from_value(json!({ "database": { "url": "" } }))
            .expect("minimal config deserializes");

        let storage = MemoryObjectStorage::new(config.storage.bucket.clone());
        let fetcher = Arc::new(BucketFetcher {
            storage: storage.clone(),
            calls: AtomicUsize::new(0),
        });
        let converter = MarkdownConverter::new(fetcher.clone())
            .with_extractor(SourceFormat::Pdf, Arc::new(CannedPdf));

        let audit = Arc::new(MemoryTable::<AuditLogEntry>::new());
        let jobs = Arc::new(MemoryTable::<AiJob>::new());
        let stores = Stores {
            audit: audit.clone(),
            jobs: jobs.clone(),
            ..Stores::in_memory()
        };

        let state = AppState::new(
            config.clone(),
            None,
            stores,
            Arc::new(storage.clone()),
            Arc::new(converter),
        );

        Self {
            router: build_app(state),
            storage,
            fetcher,
            audit,
            jobs,
            config,
        }
    }

    /// Send a request as [`OFFICER`].
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        self.send(method, path, body, &[("x-user-email", OFFICER)])
            .await
    }

    /// Send a request with explicit headers.
    pub async fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");
        for (name, value) in headers {
            req = req.header(*name, *value);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Create a document in a fresh business unit.
    pub async fn create_document(&self) -> TestResponse {
        let response = self
            .request(
                "POST",
                "/api/documents",
                Some(json!({
                    "businessUnitId": Uuid::new_v4(),
                    "title": "Anti-Money Laundering Policy",
                    "category": "policy",
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response
    }

    /// Create a version of `document_id`.
    pub async fn create_version(&self, document_id: Uuid, content: &str) -> TestResponse {
        let response = self
            .request(
                "POST",
                "/api/document-versions",
                Some(json!({
                    "documentId": document_id,
                    "version": "1.0",
                    "content": content,
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response
    }

    /// Request an upload URL for `version_id`.
    pub async fn upload_url(
        &self,
        version_id: Uuid,
        file_name: &str,
        mime_type: &str,
        file_size: i64,
    ) -> TestResponse {
        self.request(
            "POST",
            &format!("/api/document-versions?action=upload-url&id={version_id}"),
            Some(json!({
                "fileName": file_name,
                "mimeType": mime_type,
                "fileSize": file_size,
            })),
        )
        .await
    }

    /// Sign, "upload" into the bucket and confirm an attachment.
    pub async fn attach(&self, version_id: Uuid, file_name: &str, bytes: &'static [u8]) -> String {
        let ticket = self
            .upload_url(version_id, file_name, "application/pdf", bytes.len() as i64)
            .await;
        assert_eq!(ticket.status, StatusCode::OK, "{:?}", ticket.body);
        let path = ticket.str("path").to_string();

        self.storage.put_object(path.clone(), bytes).await;

        let confirmed = self
            .request(
                "POST",
                &format!("/api/document-versions?action=upload-confirm&id={version_id}"),
                Some(json!({
                    "storagePath": path,
                    "fileName": file_name,
                    "fileSize": bytes.len(),
                })),
            )
            .await;
        assert_eq!(confirmed.status, StatusCode::OK, "{:?}", confirmed.body);
        path
    }

    /// Audit entries for one entity, newest first.
    pub async fn audit_for(&self, entity_id: Uuid) -> Vec<Value> {
        let response = self
            .request("GET", &format!("/api/audit-logs?entityId={entity_id}"), None)
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response.body["items"]
            .as_array()
            .cloned()
            .unwrap_or_default()
    }
}
