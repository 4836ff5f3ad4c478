//! Store traits, one per entity family.
//!
//! Services hold these as `Arc<dyn ...>` so the PostgreSQL repositories and
//! the in-memory stores are interchangeable.

use async_trait::async_trait;
use uuid::Uuid;

use regdesk_core::result::AppResult;
use regdesk_core::types::pagination::{PageRequest, PageResponse};
use regdesk_entity::{
    AiJob, AuditLogEntry, Document, DocumentVersion, NewAuditLogEntry, PdfAttachment,
    VersionStatus,
};

/// Generic CRUD repository trait.
///
/// Entity-specific queries live on the narrower traits below.
#[async_trait]
pub trait Repository<E>: Send + Sync + std::fmt::Debug + 'static
where
    E: Send + Sync + 'static,
{
    /// Find an entity by its primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<E>>;

    /// Find all entities with pagination, newest first.
    async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<E>>;

    /// Insert a new entity and return the stored row.
    async fn insert(&self, entity: &E) -> AppResult<E>;

    /// Update an existing entity. Returns `None` if it does not exist.
    async fn update(&self, entity: &E) -> AppResult<Option<E>>;

    /// Delete an entity by its primary key. Returns `true` if deleted.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Document store.
#[async_trait]
pub trait DocumentStore: Repository<Document> {
    /// List the documents of one business unit.
    async fn find_by_business_unit(
        &self,
        business_unit_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Document>>;
}

/// Document version store.
///
/// There is deliberately no delete: versions are kept forever.
#[async_trait]
pub trait DocumentVersionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a version by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<DocumentVersion>>;

    /// List all versions of a document, newest first.
    async fn find_by_document(&self, document_id: Uuid) -> AppResult<Vec<DocumentVersion>>;

    /// Insert a new version.
    async fn insert(&self, version: &DocumentVersion) -> AppResult<DocumentVersion>;

    /// Persist the editable metadata of a version: label, content,
    /// effective date, change reason. Hash, status and attachment are
    /// left untouched.
    async fn update_metadata(&self, version: &DocumentVersion)
    -> AppResult<Option<DocumentVersion>>;

    /// Set the status of a version.
    async fn update_status(
        &self,
        id: Uuid,
        status: VersionStatus,
    ) -> AppResult<Option<DocumentVersion>>;

    /// Record (or with `None`, clear) the PDF attachment in one write.
    async fn set_pdf(
        &self,
        id: Uuid,
        attachment: Option<&PdfAttachment>,
    ) -> AppResult<Option<DocumentVersion>>;
}

/// Append-only audit log store.
#[async_trait]
pub trait AuditLogStore: Send + Sync + std::fmt::Debug + 'static {
    /// Append one entry.
    async fn append(&self, entry: NewAuditLogEntry) -> AppResult<AuditLogEntry>;

    /// Search entries, newest first.
    async fn search(
        &self,
        entity_type: Option<&str>,
        entity_id: Option<Uuid>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AuditLogEntry>>;
}

/// AI job store.
#[async_trait]
pub trait AiJobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a job by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<AiJob>>;

    /// List the jobs of an entity, newest first.
    async fn find_by_entity(&self, entity_id: Uuid) -> AppResult<Vec<AiJob>>;

    /// Insert a new job.
    async fn insert(&self, job: &AiJob) -> AppResult<AiJob>;

    /// Mark a non-terminal job as cancelled.
    ///
    /// Returns `None` when the job does not exist or is already terminal.
    async fn cancel(&self, id: Uuid) -> AppResult<Option<AiJob>>;
}
