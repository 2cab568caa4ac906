use chrono::Utc;
use tracing::{debug, info};

use crate::store::{EntityKind, EntityRecord, EntityStore, StoreError};

/// Set the soft-deleted marker. The row stays in place, hidden from normal fetches,
/// restorable until purged.
pub async fn soft_delete(
    store: &dyn EntityStore,
    kind: EntityKind,
    id: &str,
) -> Result<EntityRecord, StoreError> {
    debug!("Soft deleting {} {}", kind, id);
    let record = store.set_soft_deleted(kind, id, Some(Utc::now())).await?;
    info!("Soft deleted {} {}", kind, id);
    Ok(record)
}

/// Clear the soft-deleted marker; the entity becomes visible again in normal queries.
pub async fn restore(
    store: &dyn EntityStore,
    kind: EntityKind,
    id: &str,
) -> Result<EntityRecord, StoreError> {
    debug!("Restoring {} {}", kind, id);
    let record = store.set_soft_deleted(kind, id, None).await?;
    info!("Restored {} {}", kind, id);
    Ok(record)
}
