//! AI job service: enqueue, read, cancel.
//!
//! Jobs are executed by an external runner that writes progress, results
//! and terminal states straight to the store.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use regdesk_core::error::AppError;
use regdesk_core::result::AppResult;
use regdesk_database::AiJobStore;
use regdesk_entity::AiJob;

/// Longest accepted job type identifier.
const MAX_JOB_TYPE_LEN: usize = 64;

/// Manages AI jobs.
#[derive(Debug, Clone)]
pub struct AiJobService {
    store: Arc<dyn AiJobStore>,
}

impl AiJobService {
    /// Creates a new AI job service.
    pub fn new(store: Arc<dyn AiJobStore>) -> Self {
        Self { store }
    }

    /// Get a job.
    pub async fn get(&self, id: Uuid) -> AppResult<AiJob> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("AI job not found"))
    }

    /// List the jobs of an entity, newest first.
    pub async fn list_for_entity(&self, entity_id: Uuid) -> AppResult<Vec<AiJob>> {
        self.store.find_by_entity(entity_id).await
    }

    /// Enqueue a pending job for the runner.
    pub async fn enqueue(&self, job_type: &str, entity_id: Uuid) -> AppResult<AiJob> {
        let job_type = job_type.trim();
        let valid = !job_type.is_empty()
            && job_type.len() <= MAX_JOB_TYPE_LEN
            && job_type
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(AppError::validation(format!(
                "Invalid job type: {job_type:?}"
            )));
        }

        let job = self.store.insert(&AiJob::pending(job_type, entity_id)).await?;
        info!(job_id = %job.id, job_type = %job.job_type, entity_id = %entity_id, "AI job enqueued");
        Ok(job)
    }

    /// Ask the runner to stop a job.
    ///
    /// Cancelling a job that already reached a terminal status is a conflict.
    pub async fn cancel(&self, id: Uuid) -> AppResult<AiJob> {
        let job = self.get(id).await?;
        if job.status.is_terminal() {
            return Err(AppError::conflict(format!("AI job is already {}", job.status)));
        }

        let job = self
            .store
            .cancel(id)
            .await?
            .ok_or_else(|| AppError::conflict("AI job finished before it could be cancelled"))?;
        info!(job_id = %id, "AI job cancellation requested");
        Ok(job)
    }
}
