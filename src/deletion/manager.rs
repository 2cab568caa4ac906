use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use super::dependencies::{DependencyChecker, DependencyError};
use super::models::{DeleteOutcome, DeletionError};
use super::{hard, soft};
use crate::audit::{Actor, AuditDraft, AuditRecorder, RequestMeta};
use crate::core::config::CoreConfig;
use crate::core::policy::DeleteMode;
use crate::ratelimit::{OperationClass, RateDecision, RateLimiter};
use crate::store::{EntityKind, EntitySnapshot, EntityStore};

/// Composes rate limiting, dependency checking, the policy-selected mutation and the
/// audit write into one destructive-delete operation.
///
/// Authorization happens upstream; a caller reaching this point is allowed to try.
/// Order is cheapest-first: the rate check touches nothing, the dependency check only
/// reads, and only then is the entity mutated. There is no transaction spanning the
/// dependency check and the mutation; a child created in between can leave an orphaned
/// reference (accepted, see the store docs for the strengthening path).
pub struct DeletionManager {
    store: Arc<dyn EntityStore>,
    audit: AuditRecorder,
    limiter: RateLimiter,
    dependencies: DependencyChecker,
    policy: HashMap<EntityKind, DeleteMode>,
}

impl DeletionManager {
    pub fn new(
        store: Arc<dyn EntityStore>,
        audit: AuditRecorder,
        limiter: RateLimiter,
        config: &CoreConfig,
    ) -> Self {
        info!("Initializing DeletionManager");
        let dependencies =
            DependencyChecker::new(Arc::clone(&store), config.blocking_relations.clone());
        Self {
            store,
            audit,
            limiter,
            dependencies,
            policy: config.deletion_policy.clone(),
        }
    }

    pub async fn delete(
        &self,
        kind: EntityKind,
        id: &str,
        actor: &Actor,
        meta: &RequestMeta,
    ) -> Result<DeleteOutcome, DeletionError> {
        debug!("Delete requested for {} {} by {}", kind, id, actor.id);

        // Rate check first: fail fast, nothing touched yet.
        if let RateDecision::Throttled { retry_after_secs } = self
            .limiter
            .check_and_increment(&actor.id, OperationClass::Destructive)
            .await
        {
            return Ok(DeleteOutcome::RateLimited { retry_after_secs });
        }

        // A soft-deleted row is hidden from normal fetches; further destruction goes
        // through purge.
        let record = match self.store.fetch(kind, id).await? {
            Some(record) if !record.is_soft_deleted() => record,
            _ => {
                debug!("{} {} not found or already deleted", kind, id);
                return Ok(DeleteOutcome::NotFound);
            }
        };

        let report = match self.dependencies.check(kind, id).await {
            Ok(report) => report,
            Err(DependencyError::NotFound(_)) => return Ok(DeleteOutcome::NotFound),
            Err(DependencyError::Store(e)) => return Err(e.into()),
        };
        if report.is_blocked() {
            info!(
                "Refusing to delete {} {}: blocked by {}",
                kind,
                id,
                report.summary()
            );
            return Ok(DeleteOutcome::HasDependencies { report });
        }

        let mode = *self
            .policy
            .get(&kind)
            .ok_or(DeletionError::UnsupportedKind(kind))?;
        let snapshot = EntitySnapshot::of(&record);

        match mode {
            DeleteMode::Soft => {
                soft::soft_delete(self.store.as_ref(), kind, id).await?;
            }
            DeleteMode::Hard => {
                hard::hard_delete(self.store.as_ref(), kind, id).await?;
            }
        }

        // The mutation is committed; the audit write cannot fail it or undo it.
        let draft = AuditDraft::deletion(&record, actor, meta, mode == DeleteMode::Soft);
        self.audit.record_best_effort(draft).await;

        info!("Deleted {} {} ({})", kind, id, mode);
        Ok(DeleteOutcome::Deleted {
            entity: snapshot,
            soft_deleted: mode == DeleteMode::Soft,
        })
    }
}
