use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info};

use super::models::{ArchiveError, ExpiringEntity, PurgeOutcome, RestoreOutcome};
use crate::audit::{Actor, AuditDraft, AuditRecorder, RequestMeta};
use crate::core::config::CoreConfig;
use crate::deletion::{hard_delete, restore as clear_marker};
use crate::store::{EntityKind, EntitySnapshot, EntityStore};

/// Second phase of the two-phase delete: inspect, restore or permanently purge
/// soft-deleted rows.
///
/// Restore never re-runs the dependency checker; bringing a row back cannot violate
/// referential integrity, only deleting can. Purge is reachable only from the
/// soft-deleted state.
pub struct ArchiveManager {
    store: Arc<dyn EntityStore>,
    audit: AuditRecorder,
    retention: Duration,
}

impl ArchiveManager {
    pub fn new(store: Arc<dyn EntityStore>, audit: AuditRecorder, config: &CoreConfig) -> Self {
        info!(
            "Initializing ArchiveManager (retention {} days)",
            config.retention_days
        );
        Self {
            store,
            audit,
            retention: Duration::days(config.retention_days),
        }
    }

    /// Soft-deleted rows whose purge deadline falls within the horizon, most urgent
    /// first. Overdue rows are included; they are the most urgent of all.
    pub async fn list_expiring(
        &self,
        lab_id: Option<&str>,
        within_days: i64,
    ) -> Result<Vec<ExpiringEntity>, ArchiveError> {
        let horizon = Utc::now() + Duration::days(within_days);

        let mut expiring: Vec<ExpiringEntity> = self
            .store
            .list_soft_deleted(lab_id)
            .await?
            .into_iter()
            .filter_map(|record| {
                let deleted_at = record.deleted_at?;
                let purge_deadline = deleted_at + self.retention;
                (purge_deadline <= horizon).then(|| ExpiringEntity {
                    entity_kind: record.kind,
                    entity_id: record.id,
                    name: record.name,
                    lab_id: record.lab_id,
                    deleted_at,
                    purge_deadline,
                })
            })
            .collect();

        expiring.sort_by_key(|e| e.purge_deadline);
        debug!(
            "{} soft-deleted row(s) expiring within {} day(s)",
            expiring.len(),
            within_days
        );
        Ok(expiring)
    }

    pub async fn restore(
        &self,
        kind: EntityKind,
        id: &str,
        actor: &Actor,
        meta: &RequestMeta,
    ) -> Result<RestoreOutcome, ArchiveError> {
        let record = match self.store.fetch(kind, id).await? {
            Some(record) => record,
            None => return Ok(RestoreOutcome::NotFound),
        };
        if !record.is_soft_deleted() {
            debug!("{} {} is live, nothing to restore", kind, id);
            return Ok(RestoreOutcome::NotSoftDeleted);
        }

        let restored = clear_marker(self.store.as_ref(), kind, id).await?;

        self.audit
            .record_best_effort(AuditDraft::restore(&record, actor, meta))
            .await;

        Ok(RestoreOutcome::Restored {
            entity: EntitySnapshot::of(&restored),
        })
    }

    pub async fn purge(
        &self,
        kind: EntityKind,
        id: &str,
        actor: &Actor,
        meta: &RequestMeta,
    ) -> Result<PurgeOutcome, ArchiveError> {
        let record = match self.store.fetch(kind, id).await? {
            Some(record) => record,
            None => return Ok(PurgeOutcome::NotFound),
        };
        if !record.is_soft_deleted() {
            // Purging a live row would skip the recoverable phase entirely.
            debug!("{} {} is live, refusing to purge", kind, id);
            return Ok(PurgeOutcome::NotSoftDeleted);
        }

        hard_delete(self.store.as_ref(), kind, id).await?;

        self.audit
            .record_best_effort(AuditDraft::purge(&record, actor, meta))
            .await;

        Ok(PurgeOutcome::Purged {
            entity: EntitySnapshot::of(&record),
        })
    }
}
