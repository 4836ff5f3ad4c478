//! In-memory store implementations.
//!
//! Rows are kept in insertion order; listings return newest first like
//! the PostgreSQL repositories do.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use regdesk_core::result::AppResult;
use regdesk_core::types::pagination::{PageRequest, PageResponse};
use regdesk_entity::{
    AiJob, AiJobStatus, AuditLogEntry, Document, DocumentVersion, Finding, KnowledgeArticle,
    NewAuditLogEntry, PdfAttachment, Requirement, Risk, VersionStatus,
};

use crate::store::{AiJobStore, AuditLogStore, DocumentStore, DocumentVersionStore, Repository};

/// An entity addressable by UUID.
pub trait Record: Clone + Send + Sync + std::fmt::Debug + 'static {
    /// Primary key.
    fn id(&self) -> Uuid;
}

macro_rules! impl_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Record for $ty {
                fn id(&self) -> Uuid {
                    self.id
                }
            }
        )*
    };
}

impl_record!(
    Document,
    DocumentVersion,
    AuditLogEntry,
    AiJob,
    Requirement,
    Finding,
    KnowledgeArticle,
    Risk,
);

/// A process-local table of records.
#[derive(Debug)]
pub struct MemoryTable<E> {
    rows: Arc<RwLock<Vec<E>>>,
}

impl<E> Clone for MemoryTable<E> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<E> Default for MemoryTable<E> {
    fn default() -> Self {
        Self {
            rows: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl<E: Record> MemoryTable<E> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Whether the table has no rows.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    /// Snapshot of every row, newest first.
    pub async fn all(&self) -> Vec<E> {
        self.rows.read().await.iter().rev().cloned().collect()
    }

    async fn filtered(&self, pred: impl Fn(&E) -> bool) -> Vec<E> {
        self.rows
            .read()
            .await
            .iter()
            .rev()
            .filter(|row| pred(row))
            .cloned()
            .collect()
    }

    async fn modify(&self, id: Uuid, f: impl FnOnce(&mut E)) -> Option<E> {
        let mut rows = self.rows.write().await;
        let row = rows.iter_mut().find(|r| r.id() == id)?;
        f(row);
        Some(row.clone())
    }
}

#[async_trait]
impl<E: Record> Repository<E> for MemoryTable<E> {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<E>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|r| r.id() == id)
            .cloned())
    }

    async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<E>> {
        Ok(PageResponse::from_vec(self.all().await, page))
    }

    async fn insert(&self, entity: &E) -> AppResult<E> {
        self.rows.write().await.push(entity.clone());
        Ok(entity.clone())
    }

    async fn update(&self, entity: &E) -> AppResult<Option<E>> {
        let updated = entity.clone();
        Ok(self.modify(entity.id(), move |row| *row = updated).await)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| r.id() != id);
        Ok(rows.len() != before)
    }
}

#[async_trait]
impl DocumentStore for MemoryTable<Document> {
    async fn find_by_business_unit(
        &self,
        business_unit_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Document>> {
        let docs = self
            .filtered(|d| d.business_unit_id == business_unit_id)
            .await;
        Ok(PageResponse::from_vec(docs, page))
    }
}

#[async_trait]
impl DocumentVersionStore for MemoryTable<DocumentVersion> {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<DocumentVersion>> {
        Repository::find_by_id(self, id).await
    }

    async fn find_by_document(&self, document_id: Uuid) -> AppResult<Vec<DocumentVersion>> {
        Ok(self.filtered(|v| v.document_id == document_id).await)
    }

    async fn insert(&self, version: &DocumentVersion) -> AppResult<DocumentVersion> {
        Repository::insert(self, version).await
    }

    async fn update_metadata(
        &self,
        version: &DocumentVersion,
    ) -> AppResult<Option<DocumentVersion>> {
        let v = version.clone();
        Ok(self
            .modify(version.id, move |row| {
                row.version = v.version;
                row.content = v.content;
                row.effective_date = v.effective_date;
                row.change_reason = v.change_reason;
                row.updated_at = Utc::now();
            })
            .await)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: VersionStatus,
    ) -> AppResult<Option<DocumentVersion>> {
        Ok(self
            .modify(id, |row| {
                row.status = status;
                row.updated_at = Utc::now();
            })
            .await)
    }

    async fn set_pdf(
        &self,
        id: Uuid,
        attachment: Option<&PdfAttachment>,
    ) -> AppResult<Option<DocumentVersion>> {
        let attachment = attachment.cloned();
        Ok(self
            .modify(id, move |row| {
                row.set_pdf(attachment);
                row.updated_at = Utc::now();
            })
            .await)
    }
}

#[async_trait]
impl AuditLogStore for MemoryTable<AuditLogEntry> {
    async fn append(&self, entry: NewAuditLogEntry) -> AppResult<AuditLogEntry> {
        let row = entry.into_entry();
        self.rows.write().await.push(row.clone());
        Ok(row)
    }

    async fn search(
        &self,
        entity_type: Option<&str>,
        entity_id: Option<Uuid>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AuditLogEntry>> {
        let entries = self
            .filtered(|e| {
                entity_type.is_none_or(|t| e.entity_type == t)
                    && entity_id.is_none_or(|id| e.entity_id == id)
            })
            .await;
        Ok(PageResponse::from_vec(entries, page))
    }
}

#[async_trait]
impl AiJobStore for MemoryTable<AiJob> {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<AiJob>> {
        Repository::find_by_id(self, id).await
    }

    async fn find_by_entity(&self, entity_id: Uuid) -> AppResult<Vec<AiJob>> {
        Ok(self.filtered(|j| j.entity_id == entity_id).await)
    }

    async fn insert(&self, job: &AiJob) -> AppResult<AiJob> {
        Repository::insert(self, job).await
    }

    async fn cancel(&self, id: Uuid) -> AppResult<Option<AiJob>> {
        let mut rows = self.rows.write().await;
        let Some(job) = rows
            .iter_mut()
            .find(|j| j.id == id && !j.status.is_terminal())
        else {
            return Ok(None);
        };
        let now = Utc::now();
        job.status = AiJobStatus::Cancelled;
        job.updated_at = now;
        job.completed_at = Some(now);
        Ok(Some(job.clone()))
    }
}

impl MemoryTable<AiJob> {
    /// Overwrite a job as the external runner would. Test and dev helper.
    pub async fn put(&self, job: AiJob) {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|j| j.id == job.id) {
            Some(row) => *row = job,
            None => rows.push(job),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regdesk_entity::{AuditAction, EntityType};

    fn version(document_id: Uuid) -> DocumentVersion {
        DocumentVersion {
            id: Uuid::new_v4(),
            document_id,
            version: "1.0".to_string(),
            status: VersionStatus::Draft,
            content: "text".to_string(),
            content_hash: "hash".to_string(),
            pdf_s3_key: None,
            pdf_file_name: None,
            pdf_file_size: None,
            effective_date: None,
            created_by: "tester".to_string(),
            change_reason: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_update_metadata_keeps_hash_and_pdf() {
        let store = MemoryTable::<DocumentVersion>::new();
        let mut v = version(Uuid::new_v4());
        v.pdf_s3_key = Some("k".to_string());
        DocumentVersionStore::insert(&store, &v).await.unwrap();

        let mut edit = v.clone();
        edit.content = "changed".to_string();
        edit.content_hash = "other".to_string();
        edit.pdf_s3_key = None;
        let stored = store.update_metadata(&edit).await.unwrap().unwrap();

        assert_eq!(stored.content, "changed");
        assert_eq!(stored.content_hash, "hash");
        assert_eq!(stored.pdf_s3_key.as_deref(), Some("k"));
    }

    #[tokio::test]
    async fn test_versions_listed_newest_first() {
        let store = MemoryTable::<DocumentVersion>::new();
        let doc = Uuid::new_v4();
        let first = version(doc);
        let second = version(doc);
        DocumentVersionStore::insert(&store, &first).await.unwrap();
        DocumentVersionStore::insert(&store, &second).await.unwrap();
        DocumentVersionStore::insert(&store, &version(Uuid::new_v4()))
            .await
            .unwrap();

        let listed = store.find_by_document(doc).await.unwrap();
        assert_eq!(
            listed.iter().map(|v| v.id).collect::<Vec<_>>(),
            vec![second.id, first.id]
        );
    }

    #[tokio::test]
    async fn test_audit_search_filters_by_type() {
        let store = MemoryTable::<AuditLogEntry>::new();
        let id = Uuid::new_v4();
        store
            .append(NewAuditLogEntry::new(
                EntityType::Document,
                id,
                AuditAction::Created,
                "a",
                "doc",
            ))
            .await
            .unwrap();
        store
            .append(NewAuditLogEntry::new(
                EntityType::DocumentVersion,
                id,
                AuditAction::Created,
                "a",
                "ver",
            ))
            .await
            .unwrap();

        let page = store
            .search(Some("document_version"), None, &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].details, "ver");
    }

    #[tokio::test]
    async fn test_cancel_only_non_terminal_jobs() {
        let store = MemoryTable::<AiJob>::new();
        let job = AiJob::pending("gap_analysis", Uuid::new_v4());
        AiJobStore::insert(&store, &job).await.unwrap();

        let cancelled = store.cancel(job.id).await.unwrap().unwrap();
        assert_eq!(cancelled.status, AiJobStatus::Cancelled);
        assert!(cancelled.completed_at.is_some());

        assert!(store.cancel(job.id).await.unwrap().is_none());
    }
}
