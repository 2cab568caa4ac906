//! In-memory repository adapter, used by tests and single-process deployments.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::debug;

use super::models::{EntityKind, EntityRecord};
use super::{EntityStore, StoreError};

/// Keeps every row in one map keyed by (kind, id).
///
/// Each trait call takes the lock once; nothing is held across a dependency check and
/// the following mutation. A backend wanting strict check-then-act guarantees should
/// wrap both in a serializable transaction or an optimistic version check.
#[derive(Default)]
pub struct InMemoryStore {
    rows: RwLock<HashMap<(EntityKind, String), EntityRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    fn is_child_of(record: &EntityRecord, parent_kind: EntityKind, parent_id: &str) -> bool {
        if record.parent_id.as_deref() == Some(parent_id) {
            return true;
        }
        // Lab tenancy: anything carrying the lab id counts as the lab's child.
        parent_kind == EntityKind::Lab && record.lab_id.as_deref() == Some(parent_id)
    }
}

#[async_trait]
impl EntityStore for InMemoryStore {
    async fn fetch(
        &self,
        kind: EntityKind,
        id: &str,
    ) -> Result<Option<EntityRecord>, StoreError> {
        Ok(self.rows.read().get(&(kind, id.to_string())).cloned())
    }

    async fn insert(&self, record: EntityRecord) -> Result<(), StoreError> {
        let key = (record.kind, record.id.clone());
        let mut rows = self.rows.write();
        if rows.contains_key(&key) {
            return Err(StoreError::Conflict(format!("{} {}", record.kind, record.id)));
        }
        debug!("Inserted {} {}", record.kind, record.id);
        rows.insert(key, record);
        Ok(())
    }

    async fn update(&self, record: EntityRecord) -> Result<(), StoreError> {
        let key = (record.kind, record.id.clone());
        let mut rows = self.rows.write();
        if !rows.contains_key(&key) {
            return Err(StoreError::NotFound(format!("{} {}", record.kind, record.id)));
        }
        rows.insert(key, record);
        Ok(())
    }

    async fn set_soft_deleted(
        &self,
        kind: EntityKind,
        id: &str,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Result<EntityRecord, StoreError> {
        let mut rows = self.rows.write();
        let record = rows
            .get_mut(&(kind, id.to_string()))
            .ok_or_else(|| StoreError::NotFound(format!("{} {}", kind, id)))?;
        record.deleted_at = deleted_at;
        Ok(record.clone())
    }

    async fn hard_delete(&self, kind: EntityKind, id: &str) -> Result<(), StoreError> {
        let mut rows = self.rows.write();
        rows.remove(&(kind, id.to_string()))
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("{} {}", kind, id)))
    }

    async fn count_relation(
        &self,
        kind: EntityKind,
        id: &str,
        relation: &str,
    ) -> Result<u64, StoreError> {
        let rows = self.rows.read();
        let count = rows
            .values()
            .filter(|r| {
                r.deleted_at.is_none()
                    && r.kind.relation_name() == relation
                    && Self::is_child_of(r, kind, id)
            })
            .count() as u64;
        Ok(count)
    }

    async fn list_soft_deleted(
        &self,
        lab_id: Option<&str>,
    ) -> Result<Vec<EntityRecord>, StoreError> {
        let rows = self.rows.read();
        Ok(rows
            .values()
            .filter(|r| r.deleted_at.is_some())
            .filter(|r| match lab_id {
                Some(lab) => r.lab_id.as_deref() == Some(lab),
                None => true,
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_fetch_and_conflict() {
        let store = InMemoryStore::new();
        let record = EntityRecord::new(EntityKind::Study, "s-1", "Microbiome pilot");

        store.insert(record.clone()).await.unwrap();
        let fetched = store.fetch(EntityKind::Study, "s-1").await.unwrap().unwrap();
        assert_eq!(fetched.name, "Microbiome pilot");

        let duplicate = store.insert(record).await;
        assert!(matches!(duplicate, Err(StoreError::Conflict(_))));
    }

    #[test]
    fn test_len_tracks_inserts() {
        tokio_test::block_on(async {
            let store = InMemoryStore::new();
            assert!(store.is_empty());
            store
                .insert(EntityRecord::new(EntityKind::Task, "t-1", "a"))
                .await
                .unwrap();
            assert_eq!(store.len(), 1);
        });
    }

    #[tokio::test]
    async fn test_soft_delete_marker_round_trip() {
        let store = InMemoryStore::new();
        store
            .insert(EntityRecord::new(EntityKind::Task, "t-1", "Prep reagents"))
            .await
            .unwrap();

        let marked = store
            .set_soft_deleted(EntityKind::Task, "t-1", Some(Utc::now()))
            .await
            .unwrap();
        assert!(marked.is_soft_deleted());

        let cleared = store
            .set_soft_deleted(EntityKind::Task, "t-1", None)
            .await
            .unwrap();
        assert!(!cleared.is_soft_deleted());
    }

    #[tokio::test]
    async fn test_update_replaces_row() {
        let store = InMemoryStore::new();
        store
            .insert(EntityRecord::new(EntityKind::Study, "s-1", "Draft title"))
            .await
            .unwrap();

        let mut record = store.fetch(EntityKind::Study, "s-1").await.unwrap().unwrap();
        record.name = "Final title".to_string();
        store.update(record).await.unwrap();

        let fetched = store.fetch(EntityKind::Study, "s-1").await.unwrap().unwrap();
        assert_eq!(fetched.name, "Final title");

        let ghost = EntityRecord::new(EntityKind::Study, "ghost", "x");
        assert!(matches!(store.update(ghost).await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_hard_delete_removes_row() {
        let store = InMemoryStore::new();
        store
            .insert(EntityRecord::new(EntityKind::Bucket, "b-1", "2026 grants"))
            .await
            .unwrap();

        store.hard_delete(EntityKind::Bucket, "b-1").await.unwrap();
        assert!(store.fetch(EntityKind::Bucket, "b-1").await.unwrap().is_none());
        assert!(matches!(
            store.hard_delete(EntityKind::Bucket, "b-1").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_count_relation_skips_soft_deleted_children() {
        let store = InMemoryStore::new();
        store
            .insert(EntityRecord::new(EntityKind::Study, "s-1", "Assay study"))
            .await
            .unwrap();
        store
            .insert(EntityRecord::new(EntityKind::Task, "t-1", "one").under("s-1"))
            .await
            .unwrap();
        store
            .insert(EntityRecord::new(EntityKind::Task, "t-2", "two").under("s-1"))
            .await
            .unwrap();

        assert_eq!(
            store.count_relation(EntityKind::Study, "s-1", "tasks").await.unwrap(),
            2
        );

        store
            .set_soft_deleted(EntityKind::Task, "t-2", Some(Utc::now()))
            .await
            .unwrap();
        assert_eq!(
            store.count_relation(EntityKind::Study, "s-1", "tasks").await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_lab_tenancy_counts_by_lab_id() {
        let store = InMemoryStore::new();
        store
            .insert(EntityRecord::new(EntityKind::Lab, "lab-1", "Chem lab"))
            .await
            .unwrap();
        // Study parented under a bucket but owned by the lab.
        store
            .insert(
                EntityRecord::new(EntityKind::Study, "s-1", "Solvent study")
                    .in_lab("lab-1")
                    .under("b-1"),
            )
            .await
            .unwrap();

        assert_eq!(
            store.count_relation(EntityKind::Lab, "lab-1", "studies").await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_list_soft_deleted_scoped_by_lab() {
        let store = InMemoryStore::new();
        store
            .insert(EntityRecord::new(EntityKind::Idea, "i-1", "a").in_lab("lab-1"))
            .await
            .unwrap();
        store
            .insert(EntityRecord::new(EntityKind::Idea, "i-2", "b").in_lab("lab-2"))
            .await
            .unwrap();
        for id in ["i-1", "i-2"] {
            store
                .set_soft_deleted(EntityKind::Idea, id, Some(Utc::now()))
                .await
                .unwrap();
        }

        assert_eq!(store.list_soft_deleted(None).await.unwrap().len(), 2);
        let scoped = store.list_soft_deleted(Some("lab-1")).await.unwrap();
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].id, "i-1");
    }
}
