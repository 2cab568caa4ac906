use async_trait::async_trait;
use parking_lot::Mutex;
use thiserror::Error;

use super::models::AuditRecord;
use crate::store::EntityKind;

#[derive(Debug, Error)]
pub enum AuditStoreError {
    #[error("audit store unavailable: {0}")]
    Unavailable(String),
}

/// Append-only ledger seam. No update or delete is exposed anywhere on this trait;
/// non-repudiation depends on it.
#[async_trait]
pub trait AuditStore: Send + Sync {
    async fn append(&self, record: &AuditRecord) -> Result<(), AuditStoreError>;

    async fn list_for_entity(
        &self,
        kind: EntityKind,
        entity_id: &str,
    ) -> Result<Vec<AuditRecord>, AuditStoreError>;
}

#[derive(Default)]
pub struct InMemoryAuditStore {
    records: Mutex<Vec<AuditRecord>>,
}

impl InMemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

#[async_trait]
impl AuditStore for InMemoryAuditStore {
    async fn append(&self, record: &AuditRecord) -> Result<(), AuditStoreError> {
        self.records.lock().push(record.clone());
        Ok(())
    }

    async fn list_for_entity(
        &self,
        kind: EntityKind,
        entity_id: &str,
    ) -> Result<Vec<AuditRecord>, AuditStoreError> {
        Ok(self
            .records
            .lock()
            .iter()
            .filter(|r| r.entity_kind == kind && r.entity_id == entity_id)
            .cloned()
            .collect())
    }
}
