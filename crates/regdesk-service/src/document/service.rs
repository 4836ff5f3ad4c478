//! Document CRUD.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use regdesk_core::error::AppError;
use regdesk_core::result::AppResult;
use regdesk_core::types::pagination::{PageRequest, PageResponse};
use regdesk_database::{DocumentStore, DocumentVersionStore};
use regdesk_entity::{AuditAction, Document, EntityType};

use crate::audit::AuditService;
use crate::context::RequestContext;

/// Data required to create a document.
#[derive(Debug, Clone)]
pub struct NewDocument {
    /// Owning business unit.
    pub business_unit_id: Uuid,
    /// Title.
    pub title: String,
    /// Category.
    pub category: String,
    /// Description.
    pub description: Option<String>,
    /// Accountable owner.
    pub owner: Option<String>,
}

/// Editable document fields. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct DocumentPatch {
    /// New title.
    pub title: Option<String>,
    /// New category.
    pub category: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New owner.
    pub owner: Option<String>,
}

/// Manages documents.
#[derive(Debug, Clone)]
pub struct DocumentService {
    documents: Arc<dyn DocumentStore>,
    versions: Arc<dyn DocumentVersionStore>,
    audit: AuditService,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        versions: Arc<dyn DocumentVersionStore>,
        audit: AuditService,
    ) -> Self {
        Self {
            documents,
            versions,
            audit,
        }
    }

    /// Get a document.
    pub async fn get(&self, id: Uuid) -> AppResult<Document> {
        self.documents
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Document not found"))
    }

    /// List documents, optionally restricted to one business unit.
    pub async fn list(
        &self,
        business_unit_id: Option<Uuid>,
        page: PageRequest,
    ) -> AppResult<PageResponse<Document>> {
        match business_unit_id {
            Some(bu) => self.documents.find_by_business_unit(bu, &page).await,
            None => self.documents.find_all(&page).await,
        }
    }

    /// Create a document.
    pub async fn create(&self, ctx: &RequestContext, data: NewDocument) -> AppResult<Document> {
        let now = Utc::now();
        let doc = Document {
            id: Uuid::new_v4(),
            business_unit_id: data.business_unit_id,
            title: data.title,
            category: data.category,
            description: data.description,
            owner: data.owner,
            created_at: now,
            updated_at: now,
        };
        let doc = self.documents.insert(&doc).await?;

        self.audit
            .record(
                ctx,
                EntityType::Document,
                doc.id,
                AuditAction::Created,
                format!("Created document {}", doc.title),
            )
            .await?;

        info!(document_id = %doc.id, business_unit_id = %doc.business_unit_id, "Document created");
        Ok(doc)
    }

    /// Update a document's editable fields.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        patch: DocumentPatch,
    ) -> AppResult<Document> {
        let mut doc = self.get(id).await?;
        if let Some(title) = patch.title {
            doc.title = title;
        }
        if let Some(category) = patch.category {
            doc.category = category;
        }
        if patch.description.is_some() {
            doc.description = patch.description;
        }
        if patch.owner.is_some() {
            doc.owner = patch.owner;
        }

        let doc = self
            .documents
            .update(&doc)
            .await?
            .ok_or_else(|| AppError::not_found("Document not found"))?;

        self.audit
            .record(
                ctx,
                EntityType::Document,
                doc.id,
                AuditAction::Updated,
                format!("Updated document {}", doc.title),
            )
            .await?;

        info!(document_id = %doc.id, "Document updated");
        Ok(doc)
    }

    /// Delete a document that has no versions.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let doc = self.get(id).await?;

        if !self.versions.find_by_document(id).await?.is_empty() {
            return Err(AppError::conflict(
                "Document has versions and cannot be deleted",
            ));
        }

        if !self.documents.delete(id).await? {
            return Err(AppError::not_found("Document not found"));
        }

        self.audit
            .record(
                ctx,
                EntityType::Document,
                id,
                AuditAction::Deleted,
                format!("Deleted document {}", doc.title),
            )
            .await?;

        info!(document_id = %id, "Document deleted");
        Ok(())
    }
}
