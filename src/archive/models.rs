use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::{EntityKind, EntitySnapshot, StoreError};

/// One soft-deleted row approaching its purge deadline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpiringEntity {
    pub entity_kind: EntityKind,
    pub entity_id: String,
    pub name: String,
    pub lab_id: Option<String>,
    pub deleted_at: DateTime<Utc>,
    pub purge_deadline: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RestoreOutcome {
    Restored { entity: EntitySnapshot },
    NotSoftDeleted,
    NotFound,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PurgeOutcome {
    Purged { entity: EntitySnapshot },
    NotSoftDeleted,
    NotFound,
}

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
