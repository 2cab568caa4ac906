use tracing::{info, warn};

use crate::store::{EntityKind, EntityStore, StoreError};

/// Permanently remove the row. Irreversible; audit history of the entity is left
/// untouched.
pub async fn hard_delete(
    store: &dyn EntityStore,
    kind: EntityKind,
    id: &str,
) -> Result<(), StoreError> {
    warn!("HARD DELETE requested for {} {} - this is irreversible", kind, id);
    store.hard_delete(kind, id).await?;
    info!("Hard deleted {} {}", kind, id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{EntityRecord, InMemoryStore};

    #[tokio::test]
    async fn test_hard_delete_removes_row_for_good() {
        let store = InMemoryStore::new();
        store
            .insert(EntityRecord::new(EntityKind::Bucket, "b-1", "Archive bucket"))
            .await
            .unwrap();

        hard_delete(&store, EntityKind::Bucket, "b-1").await.unwrap();
        assert!(store.fetch(EntityKind::Bucket, "b-1").await.unwrap().is_none());
    }
}
