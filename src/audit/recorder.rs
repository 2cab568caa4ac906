use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use super::models::{AuditDraft, AuditRecord};
use super::store::{AuditStore, AuditStoreError};

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("audit write failed: {0}")]
    WriteFailed(#[from] AuditStoreError),
}

#[derive(Clone)]
pub struct AuditRecorder {
    store: Arc<dyn AuditStore>,
}

impl AuditRecorder {
    pub fn new(store: Arc<dyn AuditStore>) -> Self {
        Self { store }
    }

    /// Persist one immutable record. Fails only when the underlying store is down.
    pub async fn record(&self, draft: AuditDraft) -> Result<AuditRecord, AuditError> {
        let record = draft.into_record();
        self.store.append(&record).await?;
        debug!(
            "Audit {} {} {} by {}",
            record.action, record.entity_kind, record.entity_id, record.actor_id
        );
        Ok(record)
    }

    /// Write path for callers whose primary mutation has already committed.
    ///
    /// The write runs in a detached task: a caller cancelled mid-request cannot revoke
    /// it, and a store failure logs a warning instead of surfacing. Losing an audit
    /// entry is acceptable; rolling back a committed user action is not. The task is
    /// awaited on the normal path so completed calls have durable records.
    pub async fn record_best_effort(&self, draft: AuditDraft) -> Option<AuditRecord> {
        let recorder = self.clone();
        let handle = tokio::spawn(async move { recorder.record(draft).await });

        match handle.await {
            Ok(Ok(record)) => Some(record),
            Ok(Err(e)) => {
                warn!("Audit write failed, mutation stands: {}", e);
                None
            }
            Err(e) => {
                warn!("Audit task aborted: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::models::{Actor, AuditAction, RequestMeta};
    use crate::audit::store::InMemoryAuditStore;
    use crate::store::{EntityKind, EntityRecord};
    use async_trait::async_trait;

    struct DownAuditStore;

    #[async_trait]
    impl AuditStore for DownAuditStore {
        async fn append(&self, _record: &AuditRecord) -> Result<(), AuditStoreError> {
            Err(AuditStoreError::Unavailable("connection refused".into()))
        }

        async fn list_for_entity(
            &self,
            _kind: EntityKind,
            _entity_id: &str,
        ) -> Result<Vec<AuditRecord>, AuditStoreError> {
            Err(AuditStoreError::Unavailable("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_record_appends_exactly_one() {
        let store = Arc::new(InMemoryAuditStore::new());
        let recorder = AuditRecorder::new(store.clone());

        let draft = AuditDraft::new(
            &Actor::new("alice"),
            AuditAction::Create,
            EntityKind::Study,
            "s-1",
        );
        let record = recorder.record(draft).await.unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(record.actor_id, "alice");
        let listed = store.list_for_entity(EntityKind::Study, "s-1").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, record.id);
    }

    #[tokio::test]
    async fn test_best_effort_swallows_store_failure() {
        let recorder = AuditRecorder::new(Arc::new(DownAuditStore));
        let record = EntityRecord::new(EntityKind::Task, "t-1", "doomed");

        let draft = AuditDraft::deletion(
            &record,
            &Actor::new("alice"),
            &RequestMeta::default(),
            true,
        );
        // Must not panic or error; the loss is logged.
        assert!(recorder.record_best_effort(draft).await.is_none());
    }

    #[tokio::test]
    async fn test_best_effort_returns_record_when_store_is_up() {
        let store = Arc::new(InMemoryAuditStore::new());
        let recorder = AuditRecorder::new(store.clone());
        let record = EntityRecord::new(EntityKind::Task, "t-1", "fine");

        let draft = AuditDraft::deletion(
            &record,
            &Actor::new("bob"),
            &RequestMeta::default(),
            false,
        );
        let written = recorder.record_best_effort(draft).await.unwrap();
        assert_eq!(written.entity_id, "t-1");
        assert_eq!(store.len(), 1);
    }
}
