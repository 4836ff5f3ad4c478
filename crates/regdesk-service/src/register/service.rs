//! Register CRUD service.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use regdesk_core::error::AppError;
use regdesk_core::result::AppResult;
use regdesk_core::types::pagination::{PageRequest, PageResponse};
use regdesk_database::Repository;

use super::entity::RegisterEntity;

/// CRUD over one register.
#[derive(Debug)]
pub struct RegisterService<E: RegisterEntity> {
    repo: Arc<dyn Repository<E>>,
}

impl<E: RegisterEntity> Clone for RegisterService<E> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<E: RegisterEntity> RegisterService<E> {
    /// Creates a new register service.
    pub fn new(repo: Arc<dyn Repository<E>>) -> Self {
        Self { repo }
    }

    fn not_found() -> AppError {
        AppError::not_found(format!("{} not found", E::NAME))
    }

    /// Get one row.
    pub async fn get(&self, id: Uuid) -> AppResult<E> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(Self::not_found)
    }

    /// List rows, newest first.
    pub async fn list(&self, page: PageRequest) -> AppResult<PageResponse<E>> {
        self.repo.find_all(&page).await
    }

    /// Insert a new row.
    pub async fn create(&self, entity: E) -> AppResult<E> {
        entity.check()?;
        let created = self.repo.insert(&entity).await?;
        info!(entity = E::NAME, id = %created.id(), "Register entry created");
        Ok(created)
    }

    /// Load a row, apply `patch`, check and persist it.
    pub async fn update<F>(&self, id: Uuid, patch: F) -> AppResult<E>
    where
        F: FnOnce(&mut E) + Send,
    {
        let mut entity = self.get(id).await?;
        patch(&mut entity);
        entity.touch(Utc::now());
        entity.check()?;

        let updated = self
            .repo
            .update(&entity)
            .await?
            .ok_or_else(Self::not_found)?;
        info!(entity = E::NAME, id = %id, "Register entry updated");
        Ok(updated)
    }

    /// Delete a row.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(Self::not_found());
        }
        info!(entity = E::NAME, id = %id, "Register entry deleted");
        Ok(())
    }
}
