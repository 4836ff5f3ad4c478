//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Duration;

use regdesk_convert::MarkdownConverter;
use regdesk_core::config::AppConfig;
use regdesk_core::traits::ObjectStorage;
use regdesk_database::memory::MemoryTable;
use regdesk_database::repositories::{
    AiJobRepository, AuditLogRepository, DocumentRepository, DocumentVersionRepository,
    FindingRepository, KnowledgeArticleRepository, RequirementRepository, RiskRepository,
};
use regdesk_database::{
    AiJobStore, AuditLogStore, DatabasePool, DocumentStore, DocumentVersionStore, Repository,
};
use regdesk_entity::{
    AiJob, AuditLogEntry, Document, DocumentVersion, Finding, KnowledgeArticle, Requirement, Risk,
};
use regdesk_service::{
    AiJobService, AuditService, DocumentService, RegisterService, VersionService,
};
use regdesk_storage::UploadPolicy;

/// One store per entity family.
#[derive(Debug, Clone)]
pub struct Stores {
    pub documents: Arc<dyn DocumentStore>,
    pub versions: Arc<dyn DocumentVersionStore>,
    pub audit: Arc<dyn AuditLogStore>,
    pub jobs: Arc<dyn AiJobStore>,
    pub requirements: Arc<dyn Repository<Requirement>>,
    pub findings: Arc<dyn Repository<Finding>>,
    pub knowledge: Arc<dyn Repository<KnowledgeArticle>>,
    pub risks: Arc<dyn Repository<Risk>>,
}

impl Stores {
    /// PostgreSQL-backed stores sharing one pool.
    pub fn postgres(db: &DatabasePool) -> Self {
        let pool = db.pool();
        Self {
            documents: Arc::new(DocumentRepository::new(pool.clone())),
            versions: Arc::new(DocumentVersionRepository::new(pool.clone())),
            audit: Arc::new(AuditLogRepository::new(pool.clone())),
            jobs: Arc::new(AiJobRepository::new(pool.clone())),
            requirements: Arc::new(RequirementRepository::new(pool.clone())),
            findings: Arc::new(FindingRepository::new(pool.clone())),
            knowledge: Arc::new(KnowledgeArticleRepository::new(pool.clone())),
            risks: Arc::new(RiskRepository::new(pool.clone())),
        }
    }

    /// Process-local stores.
    pub fn in_memory() -> Self {
        Self {
            documents: Arc::new(MemoryTable::<Document>::new()),
            versions: Arc::new(MemoryTable::<DocumentVersion>::new()),
            audit: Arc::new(MemoryTable::<AuditLogEntry>::new()),
            jobs: Arc::new(MemoryTable::<AiJob>::new()),
            requirements: Arc::new(MemoryTable::<Requirement>::new()),
            findings: Arc::new(MemoryTable::<Finding>::new()),
            knowledge: Arc::new(MemoryTable::<KnowledgeArticle>::new()),
            risks: Arc::new(MemoryTable::<Risk>::new()),
        }
    }
}

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL pool, absent when running on in-memory stores
    pub db: Option<DatabasePool>,
    /// Markdown converter, shared with the version service
    pub converter: Arc<MarkdownConverter>,

    // ── Services ─────────────────────────────────────────────
    /// Documents
    pub document_service: Arc<DocumentService>,
    /// Document versions and their attachments
    pub version_service: Arc<VersionService>,
    /// Audit log reads
    pub audit_service: Arc<AuditService>,
    /// AI jobs
    pub job_service: Arc<AiJobService>,

    // ── Registers ────────────────────────────────────────────
    /// Regulatory requirements
    pub requirement_service: Arc<RegisterService<Requirement>>,
    /// Audit findings
    pub finding_service: Arc<RegisterService<Finding>>,
    /// Knowledge-base articles
    pub knowledge_service: Arc<RegisterService<KnowledgeArticle>>,
    /// Risk register
    pub risk_service: Arc<RegisterService<Risk>>,
}

impl AppState {
    /// Wire the services over the given stores and adapters.
    pub fn new(
        config: AppConfig,
        db: Option<DatabasePool>,
        stores: Stores,
        storage: Arc<dyn ObjectStorage>,
        converter: Arc<MarkdownConverter>,
    ) -> Self {
        let audit = AuditService::new(Arc::clone(&stores.audit));

        let document_service = DocumentService::new(
            Arc::clone(&stores.documents),
            Arc::clone(&stores.versions),
            audit.clone(),
        );
        let version_service = VersionService::new(
            Arc::clone(&stores.documents),
            Arc::clone(&stores.versions),
            audit.clone(),
            storage,
            Arc::clone(&converter),
            UploadPolicy::from_config(&config.storage),
            Duration::from_secs(config.storage.download_url_expiry_seconds),
        );

        Self {
            config: Arc::new(config),
            db,
            converter,
            document_service: Arc::new(document_service),
            version_service: Arc::new(version_service),
            audit_service: Arc::new(audit),
            job_service: Arc::new(AiJobService::new(stores.jobs)),
            requirement_service: Arc::new(RegisterService::new(stores.requirements)),
            finding_service: Arc::new(RegisterService::new(stores.findings)),
            knowledge_service: Arc::new(RegisterService::new(stores.knowledge)),
            risk_service: Arc::new(RegisterService::new(stores.risks)),
        }
    }
}
