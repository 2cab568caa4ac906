//! Entity repository: the persistence seam the deletion core runs against.

pub mod memory;
pub mod models;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

pub use memory::InMemoryStore;
pub use models::{EntityKind, EntityRecord, EntitySnapshot};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("entity not found: {0}")]
    NotFound(String),
    #[error("entity already exists: {0}")]
    Conflict(String),
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Generic persistence access per entity kind.
///
/// `fetch` returns the row whether or not it is soft-deleted; callers inspect the
/// marker. Relation counts cover live children only, so a soft-deleted child never
/// blocks its parent.
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn fetch(&self, kind: EntityKind, id: &str)
    -> Result<Option<EntityRecord>, StoreError>;

    async fn insert(&self, record: EntityRecord) -> Result<(), StoreError>;

    async fn update(&self, record: EntityRecord) -> Result<(), StoreError>;

    /// Set or clear the soft-deleted marker, returning the updated row.
    async fn set_soft_deleted(
        &self,
        kind: EntityKind,
        id: &str,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Result<EntityRecord, StoreError>;

    /// Permanently remove the row. Irreversible.
    async fn hard_delete(&self, kind: EntityKind, id: &str) -> Result<(), StoreError>;

    /// Live count of one named child relation of the given entity.
    async fn count_relation(
        &self,
        kind: EntityKind,
        id: &str,
        relation: &str,
    ) -> Result<u64, StoreError>;

    /// All soft-deleted rows, optionally scoped to one lab.
    async fn list_soft_deleted(
        &self,
        lab_id: Option<&str>,
    ) -> Result<Vec<EntityRecord>, StoreError>;
}
