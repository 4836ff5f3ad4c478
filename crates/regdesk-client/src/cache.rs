//! Explicit query cache.
//!
//! Query results are cached under a [`QueryKey`]. Mutations do not touch
//! the cache themselves; each one is described by a [`Mutation`] whose
//! [`invalidates`](Mutation::invalidates) list is applied after the
//! request succeeds.

use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use regdesk_core::config::ClientConfig;

/// Identity of a cached query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// A page of documents.
    Documents {
        business_unit_id: Option<Uuid>,
        page: u64,
    },
    /// One document.
    Document(Uuid),
    /// All versions of a document.
    Versions(Uuid),
    /// One version.
    Version(Uuid),
    /// A page of audit entries.
    AuditLogs {
        entity_id: Option<Uuid>,
        page: u64,
    },
    /// Jobs of an entity.
    AiJobs(Uuid),
    /// A page of a register.
    RegisterPage { register: &'static str, page: u64 },
    /// One register row.
    RegisterRow { register: &'static str, id: Uuid },
}

/// What a mutation invalidates: one key or every key of a family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invalidation {
    /// Exactly this key.
    Key(QueryKey),
    /// Every documents page.
    DocumentPages,
    /// Every audit page.
    AuditPages,
    /// Every page of a register.
    RegisterPages(&'static str),
}

impl Invalidation {
    fn matches(&self, key: &QueryKey) -> bool {
        match (self, key) {
            (Self::Key(k), key) => k == key,
            (Self::DocumentPages, QueryKey::Documents { .. }) => true,
            (Self::AuditPages, QueryKey::AuditLogs { .. }) => true,
            (Self::RegisterPages(r), QueryKey::RegisterPage { register, .. }) => r == register,
            _ => false,
        }
    }
}

/// A mutation performed through the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// A document was created.
    CreateDocument,
    /// A document's fields were edited.
    UpdateDocument { id: Uuid },
    /// A document was deleted.
    DeleteDocument { id: Uuid },
    /// A version was added to a document.
    CreateVersion { document_id: Uuid },
    /// A version's metadata was edited.
    UpdateVersion { id: Uuid, document_id: Uuid },
    /// A version moved to another workflow status.
    ChangeVersionStatus { id: Uuid, document_id: Uuid },
    /// A PDF upload was confirmed on a version.
    ConfirmUpload { id: Uuid, document_id: Uuid },
    /// A version's PDF was removed.
    DeletePdf { id: Uuid, document_id: Uuid },
    /// An AI job was queued for an entity.
    EnqueueJob { entity_id: Uuid },
    /// Cancellation of an entity's AI job was requested.
    CancelJob { entity_id: Uuid },
    /// A row was added to a register.
    CreateRegisterRow { register: &'static str },
    /// A register row was edited.
    UpdateRegisterRow { register: &'static str, id: Uuid },
    /// A register row was deleted.
    DeleteRegisterRow { register: &'static str, id: Uuid },
}

impl Mutation {
    /// Keys made stale by this mutation.
    pub fn invalidates(&self) -> Vec<Invalidation> {
        use Invalidation::{AuditPages, DocumentPages, Key, RegisterPages};

        match *self {
            Self::CreateDocument => vec![DocumentPages, AuditPages],
            Self::UpdateDocument { id } | Self::DeleteDocument { id } => {
                vec![Key(QueryKey::Document(id)), DocumentPages, AuditPages]
            }
            Self::CreateVersion { document_id } => {
                vec![Key(QueryKey::Versions(document_id)), AuditPages]
            }
            Self::UpdateVersion { id, document_id }
            | Self::ChangeVersionStatus { id, document_id }
            | Self::ConfirmUpload { id, document_id }
            | Self::DeletePdf { id, document_id } => vec![
                Key(QueryKey::Version(id)),
                Key(QueryKey::Versions(document_id)),
                AuditPages,
            ],
            Self::EnqueueJob { entity_id } | Self::CancelJob { entity_id } => {
                vec![Key(QueryKey::AiJobs(entity_id))]
            }
            Self::CreateRegisterRow { register } => vec![RegisterPages(register)],
            Self::UpdateRegisterRow { register, id } | Self::DeleteRegisterRow { register, id } => {
                vec![
                    Key(QueryKey::RegisterRow { register, id }),
                    RegisterPages(register),
                ]
            }
        }
    }
}

/// Cache of query results, stored as JSON.
#[derive(Debug, Clone)]
pub struct QueryCache {
    cache: Cache<QueryKey, serde_json::Value>,
}

impl QueryCache {
    /// Create a cache holding at most `capacity` results for `ttl`.
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    /// Create a cache from client configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            config.cache_capacity,
            Duration::from_secs(config.cache_ttl_seconds),
        )
    }

    /// Cached value for `key`, if present and still decodable as `T`.
    pub async fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let value = self.cache.get(key).await?;
        serde_json::from_value(value).ok()
    }

    /// Store a query result.
    pub async fn insert<T: Serialize>(&self, key: QueryKey, value: &T) {
        if let Ok(json) = serde_json::to_value(value) {
            self.cache.insert(key, json).await;
        }
    }

    /// Whether `key` is cached.
    pub fn contains(&self, key: &QueryKey) -> bool {
        self.cache.contains_key(key)
    }

    /// Drop every key made stale by `mutation`. Returns how many were removed.
    pub async fn apply(&self, mutation: &Mutation) -> usize {
        let rules = mutation.invalidates();

        let stale: Vec<QueryKey> = self
            .cache
            .iter()
            .filter(|(key, _)| rules.iter().any(|rule| rule.matches(key)))
            .map(|(key, _)| (*key).clone())
            .collect();

        for key in &stale {
            self.cache.invalidate(key).await;
        }

        debug!(mutation = ?mutation, removed = stale.len(), "Query cache invalidated");
        stale.len()
    }

    /// Drop everything.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> QueryCache {
        QueryCache::new(100, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_roundtrip_through_json() {
        let cache = cache();
        let doc = Uuid::new_v4();
        cache.insert(QueryKey::Versions(doc), &vec!["1.0", "1.1"]).await;

        let cached: Option<Vec<String>> = cache.get(&QueryKey::Versions(doc)).await;
        assert_eq!(cached, Some(vec!["1.0".to_string(), "1.1".to_string()]));
    }

    #[tokio::test]
    async fn test_status_change_invalidates_version_list_and_audit() {
        let cache = cache();
        let doc = Uuid::new_v4();
        let version = Uuid::new_v4();
        let other_doc = Uuid::new_v4();

        cache.insert(QueryKey::Versions(doc), &1).await;
        cache.insert(QueryKey::Version(version), &2).await;
        cache
            .insert(QueryKey::AuditLogs { entity_id: None, page: 1 }, &3)
            .await;
        cache
            .insert(
                QueryKey::AuditLogs {
                    entity_id: Some(version),
                    page: 2,
                },
                &4,
            )
            .await;
        cache.insert(QueryKey::Versions(other_doc), &5).await;

        let removed = cache
            .apply(&Mutation::ChangeVersionStatus {
                id: version,
                document_id: doc,
            })
            .await;

        assert_eq!(removed, 4);
        assert!(cache.contains(&QueryKey::Versions(other_doc)));
        assert!(!cache.contains(&QueryKey::Versions(doc)));
    }

    #[tokio::test]
    async fn test_register_mutation_stays_in_its_register() {
        let cache = cache();
        cache
            .insert(QueryKey::RegisterPage { register: "risks", page: 1 }, &1)
            .await;
        cache
            .insert(
                QueryKey::RegisterPage {
                    register: "findings",
                    page: 1,
                },
                &2,
            )
            .await;

        cache
            .apply(&Mutation::CreateRegisterRow { register: "risks" })
            .await;

        assert!(!cache.contains(&QueryKey::RegisterPage { register: "risks", page: 1 }));
        assert!(cache.contains(&QueryKey::RegisterPage {
            register: "findings",
            page: 1
        }));
    }

    #[test]
    fn test_job_mutations_touch_only_job_lists() {
        let entity = Uuid::new_v4();
        assert_eq!(
            Mutation::CancelJob { entity_id: entity }.invalidates(),
            vec![Invalidation::Key(QueryKey::AiJobs(entity))]
        );
    }
}
