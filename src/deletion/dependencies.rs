use std::collections::HashMap;
use std::sync::Arc;

use futures::future::try_join_all;
use thiserror::Error;
use tracing::debug;

use super::models::{DependencyReport, RelationCount};
use crate::core::policy::RelationPolicy;
use crate::store::{EntityKind, EntityStore, StoreError};

#[derive(Debug, Error)]
pub enum DependencyError {
    /// Distinct from a store failure so callers can translate it to a 404 instead of
    /// masking a true existence miss behind a generic error.
    #[error("entity not found: {0}")]
    NotFound(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Counts an entity's declared child relations before destructive deletion.
///
/// One live-count query per declared relation, issued concurrently. No side effects.
pub struct DependencyChecker {
    store: Arc<dyn EntityStore>,
    relations: HashMap<EntityKind, Vec<RelationPolicy>>,
}

impl DependencyChecker {
    pub fn new(
        store: Arc<dyn EntityStore>,
        relations: HashMap<EntityKind, Vec<RelationPolicy>>,
    ) -> Self {
        Self { store, relations }
    }

    pub async fn check(
        &self,
        kind: EntityKind,
        id: &str,
    ) -> Result<DependencyReport, DependencyError> {
        if self.store.fetch(kind, id).await?.is_none() {
            return Err(DependencyError::NotFound(format!("{} {}", kind, id)));
        }

        let declared = self.relations.get(&kind).cloned().unwrap_or_default();
        debug!(
            "Checking {} declared relation(s) for {} {}",
            declared.len(),
            kind,
            id
        );

        let counts = try_join_all(declared.into_iter().map(|policy| {
            let store = Arc::clone(&self.store);
            async move {
                let count = store.count_relation(kind, id, &policy.relation).await?;
                Ok::<_, StoreError>(RelationCount {
                    relation: policy.relation,
                    count,
                    blocking: policy.blocking,
                })
            }
        }))
        .await?;

        Ok(DependencyReport { counts })
    }
}
