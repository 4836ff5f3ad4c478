//! Typed HTTP client for the RegDesk API.

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use regdesk_core::config::ClientConfig;
use regdesk_core::error::{AppError, ErrorKind};
use regdesk_core::result::AppResult;
use regdesk_core::types::pagination::PageResponse;
use regdesk_core::types::response::ApiErrorResponse;
use regdesk_entity::{AiJob, AuditLogEntry, Document, DocumentVersion, VersionStatus};

use crate::cache::{Mutation, QueryCache, QueryKey};
use crate::types::{
    CreateVersion, DownloadMode, Markdown, SignedDownload, UploadTicket, VersionMetadata,
};

/// Header carrying the caller identity.
const ACTOR_HEADER: &str = "x-user-email";

/// The CRUD registers exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    Requirements,
    Findings,
    KnowledgeBase,
    Risks,
}

impl Register {
    /// Path segment under `/api`.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Requirements => "requirements",
            Self::Findings => "findings",
            Self::KnowledgeBase => "knowledge-base",
            Self::Risks => "risks",
        }
    }
}

/// Map an HTTP error status to an error kind.
fn kind_for(status: StatusCode) -> ErrorKind {
    match status {
        StatusCode::BAD_REQUEST => ErrorKind::Validation,
        StatusCode::NOT_FOUND => ErrorKind::NotFound,
        StatusCode::METHOD_NOT_ALLOWED => ErrorKind::NotAllowed,
        StatusCode::CONFLICT => ErrorKind::Conflict,
        _ => ErrorKind::ExternalService,
    }
}

fn transport(err: reqwest::Error) -> AppError {
    AppError::with_source(
        ErrorKind::ExternalService,
        format!("Request to RegDesk API failed: {err}"),
        err,
    )
}

/// Client for the RegDesk API.
#[derive(Debug, Clone)]
pub struct RegDeskClient {
    base: Url,
    http: reqwest::Client,
    cache: QueryCache,
}

impl RegDeskClient {
    /// Build a client from configuration.
    pub fn new(config: &ClientConfig) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(email) = config.user_email.as_deref() {
            let value = HeaderValue::from_str(email).map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Invalid client.user_email", e)
            })?;
            headers.insert(ACTOR_HEADER, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        let base = Url::parse(&config.base_url).map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Invalid client.base_url", e)
        })?;
        if base.cannot_be_a_base() {
            return Err(AppError::configuration(format!(
                "Invalid client.base_url: {}",
                config.base_url
            )));
        }

        Ok(Self {
            base,
            http,
            cache: QueryCache::from_config(config),
        })
    }

    /// The query cache.
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["api", path]);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }

    fn request(&self, method: Method, path: &str, query: &[(&str, String)]) -> RequestBuilder {
        self.http
            .request(method, self.endpoint(path, query))
            .header(ACCEPT, "application/json")
    }

    async fn check(response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ApiErrorResponse>().await {
            Ok(body) => body.message,
            Err(_) => status.to_string(),
        };
        Err(AppError::new(kind_for(status), message))
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<T> {
        let response = builder.send().await.map_err(transport)?;
        let response = Self::check(response).await?;
        response.json::<T>().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("Unexpected response body: {e}"),
                e,
            )
        })
    }

    async fn send_empty(&self, builder: RequestBuilder) -> AppResult<()> {
        let response = builder.send().await.map_err(transport)?;
        Self::check(response).await?;
        Ok(())
    }

    async fn cached<T>(&self, key: QueryKey, builder: RequestBuilder) -> AppResult<T>
    where
        T: DeserializeOwned + Serialize,
    {
        if let Some(hit) = self.cache.get::<T>(&key).await {
            debug!(key = ?key, "Query cache hit");
            return Ok(hit);
        }
        let value: T = self.send(builder).await?;
        self.cache.insert(key, &value).await;
        Ok(value)
    }

    // ── Documents ────────────────────────────────────────────

    /// List documents, optionally for one business unit.
    pub async fn documents(
        &self,
        business_unit_id: Option<Uuid>,
        page: u64,
    ) -> AppResult<PageResponse<Document>> {
        let mut query = vec![("page", page.to_string())];
        if let Some(bu) = business_unit_id {
            query.push(("businessUnitId", bu.to_string()));
        }
        let builder = self.request(Method::GET, "documents", &query);
        self.cached(
            QueryKey::Documents {
                business_unit_id,
                page,
            },
            builder,
        )
        .await
    }

    /// Get a document.
    pub async fn document(&self, id: Uuid) -> AppResult<Document> {
        let builder = self.request(Method::GET, "documents", &[("id", id.to_string())]);
        self.cached(QueryKey::Document(id), builder).await
    }

    /// Create a document from a JSON body.
    pub async fn create_document(&self, body: &impl Serialize) -> AppResult<Document> {
        let doc: Document = self
            .send(self.request(Method::POST, "documents", &[]).json(body))
            .await?;
        self.cache.apply(&Mutation::CreateDocument).await;
        Ok(doc)
    }

    /// Delete a document without versions.
    pub async fn delete_document(&self, id: Uuid) -> AppResult<()> {
        self.send_empty(
            self.request(Method::DELETE, "documents", &[("id", id.to_string())]),
        )
        .await?;
        self.cache.apply(&Mutation::DeleteDocument { id }).await;
        Ok(())
    }

    // ── Document versions ────────────────────────────────────

    fn versions(&self, method: Method, query: &[(&str, String)]) -> RequestBuilder {
        self.request(method, "document-versions", query)
    }

    /// List the versions of a document.
    pub async fn document_versions(&self, document_id: Uuid) -> AppResult<Vec<DocumentVersion>> {
        let builder = self.versions(Method::GET, &[("documentId", document_id.to_string())]);
        self.cached(QueryKey::Versions(document_id), builder).await
    }

    /// Get a version.
    pub async fn document_version(&self, id: Uuid) -> AppResult<DocumentVersion> {
        let builder = self.versions(Method::GET, &[("id", id.to_string())]);
        self.cached(QueryKey::Version(id), builder).await
    }

    /// Create a version.
    pub async fn create_version(&self, body: &CreateVersion) -> AppResult<DocumentVersion> {
        let version: DocumentVersion = self.send(self.versions(Method::POST, &[]).json(body)).await?;
        self.cache
            .apply(&Mutation::CreateVersion {
                document_id: version.document_id,
            })
            .await;
        Ok(version)
    }

    /// Update version metadata.
    pub async fn update_version(
        &self,
        id: Uuid,
        body: &VersionMetadata,
    ) -> AppResult<DocumentVersion> {
        let version: DocumentVersion = self
            .send(
                self.versions(Method::PUT, &[("id", id.to_string())])
                    .json(body),
            )
            .await?;
        self.cache
            .apply(&Mutation::UpdateVersion {
                id,
                document_id: version.document_id,
            })
            .await;
        Ok(version)
    }

    /// Change a version's status.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: VersionStatus,
    ) -> AppResult<DocumentVersion> {
        let version: DocumentVersion = self
            .send(
                self.versions(Method::PUT, &[("id", id.to_string()), ("action", "status".to_string())])
                    .json(&serde_json::json!({ "status": status })),
            )
            .await?;
        self.cache
            .apply(&Mutation::ChangeVersionStatus {
                id,
                document_id: version.document_id,
            })
            .await;
        Ok(version)
    }

    /// Ask for a signed upload URL.
    pub async fn request_upload_url(
        &self,
        id: Uuid,
        file_name: &str,
        mime_type: &str,
        file_size: i64,
    ) -> AppResult<UploadTicket> {
        self.send(
            self.versions(Method::POST, &[("id", id.to_string()), ("action", "upload-url".to_string())])
                .json(&serde_json::json!({
                    "fileName": file_name,
                    "mimeType": mime_type,
                    "fileSize": file_size,
                })),
        )
        .await
    }

    /// Record a finished upload.
    pub async fn confirm_upload(
        &self,
        id: Uuid,
        storage_path: &str,
        file_name: &str,
        file_size: i64,
    ) -> AppResult<DocumentVersion> {
        let version: DocumentVersion = self
            .send(
                self.versions(Method::POST, &[
                        ("id", id.to_string()),
                        ("action", "upload-confirm".to_string()),
                    ])
                    .json(&serde_json::json!({
                        "storagePath": storage_path,
                        "fileName": file_name,
                        "fileSize": file_size,
                    })),
            )
            .await?;
        self.cache
            .apply(&Mutation::ConfirmUpload {
                id,
                document_id: version.document_id,
            })
            .await;
        Ok(version)
    }

    /// Full upload: sign, PUT the bytes to object storage, confirm.
    pub async fn upload_pdf(
        &self,
        id: Uuid,
        file_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> AppResult<DocumentVersion> {
        let size = i64::try_from(bytes.len())
            .map_err(|_| AppError::validation("File is too large"))?;
        let ticket = self
            .request_upload_url(id, file_name, mime_type, size)
            .await?;

        let response = self
            .http
            .put(&ticket.signed_url)
            .header(CONTENT_TYPE, mime_type)
            .body(bytes)
            .send()
            .await
            .map_err(transport)?;
        if !response.status().is_success() {
            return Err(AppError::external_service(format!(
                "Object storage rejected the upload: {}",
                response.status()
            )));
        }

        self.confirm_upload(id, &ticket.path, file_name, size).await
    }

    /// Signed download URL of the attachment.
    pub async fn download_url(&self, id: Uuid, mode: DownloadMode) -> AppResult<SignedDownload> {
        self.send(self.versions(Method::GET, &[
            ("id", id.to_string()),
            ("action", "download".to_string()),
            ("mode", mode.as_str().to_string()),
        ]))
        .await
    }

    /// Markdown rendition of the attachment. Never cached.
    pub async fn to_markdown(&self, id: Uuid) -> AppResult<String> {
        let body: Markdown = self
            .send(
                self.versions(Method::GET, &[("id", id.to_string()), ("action", "to-markdown".to_string())]),
            )
            .await?;
        Ok(body.markdown)
    }

    /// Remove the attachment.
    pub async fn delete_pdf(&self, id: Uuid, document_id: Uuid) -> AppResult<()> {
        self.send_empty(
            self.versions(Method::DELETE, &[("id", id.to_string()), ("action", "pdf".to_string())]),
        )
        .await?;
        self.cache
            .apply(&Mutation::DeletePdf { id, document_id })
            .await;
        Ok(())
    }

    /// Convert any reachable document to markdown.
    pub async fn convert(&self, url: &str, filename: Option<&str>) -> AppResult<String> {
        let body: Markdown = self
            .send(
                self.request(Method::POST, "markitdown-convert", &[])
                    .json(&serde_json::json!({ "url": url, "filename": filename })),
            )
            .await?;
        Ok(body.markdown)
    }

    // ── Audit log ────────────────────────────────────────────

    /// Search audit entries.
    pub async fn audit_logs(
        &self,
        entity_type: Option<&str>,
        entity_id: Option<Uuid>,
        page: u64,
        per_page: u64,
    ) -> AppResult<PageResponse<AuditLogEntry>> {
        let mut query = vec![("page", page.to_string()), ("perPage", per_page.to_string())];
        if let Some(t) = entity_type {
            query.push(("entityType", t.to_string()));
        }
        if let Some(id) = entity_id {
            query.push(("entityId", id.to_string()));
        }
        let builder = self.request(Method::GET, "audit-logs", &query);

        // Filtered by type only: not addressable by a key, so bypass the cache.
        if entity_type.is_some() {
            return self.send(builder).await;
        }
        self.cached(QueryKey::AuditLogs { entity_id, page }, builder)
            .await
    }

    // ── AI jobs ──────────────────────────────────────────────

    /// Fetch a job. Never cached: callers poll it.
    pub async fn ai_job(&self, id: Uuid) -> AppResult<AiJob> {
        self.send(
            self.request(Method::GET, "ai-jobs", &[("id", id.to_string())]),
        )
        .await
    }

    /// Jobs of an entity.
    pub async fn ai_jobs(&self, entity_id: Uuid) -> AppResult<Vec<AiJob>> {
        let builder = self.request(Method::GET, "ai-jobs", &[("entityId", entity_id.to_string())]);
        self.cached(QueryKey::AiJobs(entity_id), builder).await
    }

    /// Enqueue a job.
    pub async fn enqueue_job(&self, job_type: &str, entity_id: Uuid) -> AppResult<AiJob> {
        let job: AiJob = self
            .send(
                self.request(Method::POST, "ai-jobs", &[])
                    .json(&serde_json::json!({ "jobType": job_type, "entityId": entity_id })),
            )
            .await?;
        self.cache.apply(&Mutation::EnqueueJob { entity_id }).await;
        Ok(job)
    }

    /// Ask the runner to cancel a job.
    pub async fn cancel_job(&self, id: Uuid) -> AppResult<AiJob> {
        let job: AiJob = self
            .send(
                self.request(Method::POST, "ai-jobs", &[("id", id.to_string()), ("action", "cancel".to_string())]),
            )
            .await?;
        self.cache
            .apply(&Mutation::CancelJob {
                entity_id: job.entity_id,
            })
            .await;
        Ok(job)
    }

    // ── Registers ────────────────────────────────────────────

    /// A page of a register.
    pub async fn register_page<T>(&self, register: Register, page: u64) -> AppResult<PageResponse<T>>
    where
        T: DeserializeOwned + Serialize,
    {
        let builder = self.request(Method::GET, register.path(), &[("page", page.to_string())]);
        self.cached(
            QueryKey::RegisterPage {
                register: register.path(),
                page,
            },
            builder,
        )
        .await
    }

    /// One register row.
    pub async fn register_row<T>(&self, register: Register, id: Uuid) -> AppResult<T>
    where
        T: DeserializeOwned + Serialize,
    {
        let builder = self.request(Method::GET, register.path(), &[("id", id.to_string())]);
        self.cached(
            QueryKey::RegisterRow {
                register: register.path(),
                id,
            },
            builder,
        )
        .await
    }

    /// Create a register row.
    pub async fn create_register_row<T>(&self, register: Register, body: &impl Serialize) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let row = self
            .send(self.request(Method::POST, register.path(), &[]).json(body))
            .await?;
        self.cache
            .apply(&Mutation::CreateRegisterRow {
                register: register.path(),
            })
            .await;
        Ok(row)
    }

    /// Update a register row.
    pub async fn update_register_row<T>(
        &self,
        register: Register,
        id: Uuid,
        body: &impl Serialize,
    ) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let row = self
            .send(
                self.request(Method::PUT, register.path(), &[("id", id.to_string())])
                    .json(body),
            )
            .await?;
        self.cache
            .apply(&Mutation::UpdateRegisterRow {
                register: register.path(),
                id,
            })
            .await;
        Ok(row)
    }

    /// Delete a register row.
    pub async fn delete_register_row(&self, register: Register, id: Uuid) -> AppResult<()> {
        self.send_empty(
            self.request(Method::DELETE, register.path(), &[("id", id.to_string())]),
        )
        .await?;
        self.cache
            .apply(&Mutation::DeleteRegisterRow {
                register: register.path(),
                id,
            })
            .await;
        Ok(())
    }
}
