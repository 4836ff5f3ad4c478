//! Per-entity hooks for [`RegisterService`](super::RegisterService).

use chrono::{DateTime, Utc};
use uuid::Uuid;

use regdesk_core::error::AppError;
use regdesk_core::result::AppResult;
use regdesk_entity::register::risk::{MAX_RATING, MIN_RATING};
use regdesk_entity::{Finding, KnowledgeArticle, Requirement, Risk};

/// A row managed by a [`RegisterService`](super::RegisterService).
pub trait RegisterEntity: Clone + Send + Sync + std::fmt::Debug + 'static {
    /// Human-readable name used in error messages.
    const NAME: &'static str;

    /// Primary key.
    fn id(&self) -> Uuid;

    /// Stamp the last-modified time.
    fn touch(&mut self, now: DateTime<Utc>);

    /// Check domain rules before the row is written.
    fn check(&self) -> AppResult<()> {
        Ok(())
    }
}

fn require_text(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

impl RegisterEntity for Requirement {
    const NAME: &'static str = "Requirement";

    fn id(&self) -> Uuid {
        self.id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn check(&self) -> AppResult<()> {
        require_text(&self.reference, "reference")?;
        require_text(&self.title, "title")?;
        require_text(&self.source, "source")
    }
}

impl RegisterEntity for Finding {
    const NAME: &'static str = "Finding";

    fn id(&self) -> Uuid {
        self.id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn check(&self) -> AppResult<()> {
        require_text(&self.title, "title")
    }
}

impl RegisterEntity for KnowledgeArticle {
    const NAME: &'static str = "Knowledge article";

    fn id(&self) -> Uuid {
        self.id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn check(&self) -> AppResult<()> {
        require_text(&self.title, "title")?;
        if self.tags.iter().any(|t| t.trim().is_empty()) {
            return Err(AppError::validation("tags must not be empty"));
        }
        Ok(())
    }
}

impl RegisterEntity for Risk {
    const NAME: &'static str = "Risk";

    fn id(&self) -> Uuid {
        self.id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn check(&self) -> AppResult<()> {
        require_text(&self.title, "title")?;
        for (field, value) in [("likelihood", self.likelihood), ("impact", self.impact)] {
            if !(MIN_RATING..=MAX_RATING).contains(&value) {
                return Err(AppError::validation(format!(
                    "{field} must be between {MIN_RATING} and {MAX_RATING}"
                )));
            }
        }
        Ok(())
    }
}
