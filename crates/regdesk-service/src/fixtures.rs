//! In-memory wiring shared by the service tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use regdesk_convert::{MarkdownConverter, SourceFormat};
use regdesk_core::config::StorageConfig;
use regdesk_core::error::AppError;
use regdesk_core::result::AppResult;
use regdesk_core::traits::{ContentFetcher, TextExtractor};
use regdesk_core::types::pagination::PageRequest;
use regdesk_database::AuditLogStore;
use regdesk_database::memory::MemoryTable;
use regdesk_entity::{AuditLogEntry, Document, DocumentVersion};
use regdesk_storage::{MemoryObjectStorage, UploadPolicy};

use crate::audit::AuditService;
use crate::context::RequestContext;
use crate::document::{DocumentService, NewDocument, NewVersion, VersionService};

/// Serves objects out of the in-memory bucket and counts calls.
#[derive(Debug)]
pub(crate) struct BucketFetcher {
    storage: MemoryObjectStorage,
    calls: AtomicUsize,
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

/// Stands in for PDF parsing.
#[derive(Debug)]
pub(crate) struct CannedPdf;

impl TextExtractor for CannedPdf {
    fn name(&self) -> &'static str {
        "canned-pdf"
    }

    fn extract(&self, _bytes: &[u8]) -> AppResult<String> {
        Ok("Extracted PDF text".to_string())
    }
}

pub(crate) struct Fixture {
    pub ctx: RequestContext,
    pub documents: DocumentService,
    pub versions: VersionService,
    pub storage: MemoryObjectStorage,
    audit_store: Arc<MemoryTable<AuditLogEntry>>,
    fetcher: Arc<BucketFetcher>,
}

impl Fixture {
    pub fn new() -> Self {
        let config = StorageConfig::default();
        let documents = Arc::new(MemoryTable::<Document>::new());
        let versions = Arc::new(MemoryTable::<DocumentVersion>::new());
        let audit_store = Arc::new(MemoryTable::<AuditLogEntry>::new());
        let storage = MemoryObjectStorage::new(config.bucket.clone());
        let fetcher = Arc::new(BucketFetcher {
            storage: storage.clone(),
            calls: AtomicUsize::new(0),
        });
        let converter = MarkdownConverter::new(fetcher.clone())
            .with_extractor(SourceFormat::Pdf, Arc::new(CannedPdf));

        let audit = AuditService::new(audit_store.clone());
        Self {
            ctx: RequestContext::new("officer@bank.test"),
            documents: DocumentService::new(documents.clone(), versions.clone(), audit.clone()),
            versions: VersionService::new(
                documents,
                versions,
                audit,
                Arc::new(storage.clone()),
                Arc::new(converter),
                UploadPolicy::from_config(&config),
                Duration::from_secs(config.download_url_expiry_seconds),
            ),
            storage,
            audit_store,
            fetcher,
        }
    }

    pub async fn document_in(&self, business_unit_id: Uuid) -> Document {
        self.documents
            .create(
                &self.ctx,
                NewDocument {
                    business_unit_id,
                    title: "Anti-Money Laundering Policy".to_string(),
                    category: "policy".to_string(),
                    description: None,
                    owner: None,
                },
            )
            .await
            .unwrap()
    }

    pub async fn document(&self) -> Document {
        self.document_in(Uuid::new_v4()).await
    }

    pub async fn version(&self, document_id: Uuid, content: &str) -> DocumentVersion {
        self.versions
            .create(
                &self.ctx,
                NewVersion {
                    document_id,
                    version: "1.0".to_string(),
                    status: None,
                    content: content.to_string(),
                    effective_date: None,
                    change_reason: None,
                },
            )
            .await
            .unwrap()
    }

    /// Audit entries of one entity, newest first.
    pub async fn audit_entries(&self, entity_id: Uuid) -> Vec<AuditLogEntry> {
        self.audit_store
            .search(None, Some(entity_id), &PageRequest::new(1, 100))
            .await
            .unwrap()
            .items
    }

    pub async fn audit_actions(&self, entity_id: Uuid) -> Vec<String> {
        self.audit_entries(entity_id)
            .await
            .into_iter()
            .map(|e| e.action)
            .collect()
    }

    pub fn fetches(&self) -> usize {
        self.fetcher.calls.load(Ordering::SeqCst)
    }
}
