//! Knowledge-base article entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A markdown article in the compliance knowledge base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeArticle {
    /// Unique identifier.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Markdown body.
    pub body: String,
    /// Category.
    pub category: Option<String>,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Whether the article is visible to readers.
    pub published: bool,
    /// Author.
    pub created_by: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}
