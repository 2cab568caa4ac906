use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::store::{EntityKind, EntityRecord};
use crate::utils::safe_truncate_ellipsis;

/// Who is performing the operation. Authentication happened upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
}

impl Actor {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Request context captured into audit metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestMeta {
    pub address: Option<String>,
    pub client_id: Option<String>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

/// Before/after pair for one field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Change {
    pub before: Value,
    pub after: Value,
}

/// Immutable ledger entry. Never updated or deleted by this crate; hard-deleting an
/// entity leaves its history behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: Uuid,
    pub actor_id: String,
    pub action: AuditAction,
    pub entity_kind: EntityKind,
    pub entity_id: String,
    pub entity_name: Option<String>,
    pub changes: Option<BTreeMap<String, Change>>,
    pub metadata: BTreeMap<String, Value>,
    pub lab_id: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Everything the caller supplies; id and timestamp are stamped at write time.
#[derive(Debug, Clone)]
pub struct AuditDraft {
    pub actor_id: String,
    pub action: AuditAction,
    pub entity_kind: EntityKind,
    pub entity_id: String,
    pub entity_name: Option<String>,
    pub changes: Option<BTreeMap<String, Change>>,
    pub metadata: BTreeMap<String, Value>,
    pub lab_id: Option<String>,
}

impl AuditDraft {
    pub fn new(
        actor: &Actor,
        action: AuditAction,
        entity_kind: EntityKind,
        entity_id: impl Into<String>,
    ) -> Self {
        Self {
            actor_id: actor.id.clone(),
            action,
            entity_kind,
            entity_id: entity_id.into(),
            entity_name: None,
            changes: None,
            metadata: BTreeMap::new(),
            lab_id: None,
        }
    }

    /// DELETE entry for the orchestrator: name snapshot taken before the mutation,
    /// metadata carrying the request context and the soft/hard flag.
    pub fn deletion(
        record: &EntityRecord,
        actor: &Actor,
        meta: &RequestMeta,
        soft_delete: bool,
    ) -> Self {
        Self::new(actor, AuditAction::Delete, record.kind, record.id.clone())
            .snapshot_of(record)
            .request_meta(meta)
            .meta("soft_delete", Value::Bool(soft_delete))
    }

    /// UPDATE entry for a restore, with the marker flip as the changes payload.
    pub fn restore(record: &EntityRecord, actor: &Actor, meta: &RequestMeta) -> Self {
        let mut changes = BTreeMap::new();
        changes.insert(
            "deleted_at".to_string(),
            Change {
                before: record
                    .deleted_at
                    .map(|t| Value::String(t.to_rfc3339()))
                    .unwrap_or(Value::Null),
                after: Value::Null,
            },
        );

        let mut draft = Self::new(actor, AuditAction::Update, record.kind, record.id.clone())
            .snapshot_of(record)
            .request_meta(meta);
        draft.changes = Some(changes);
        draft
    }

    /// DELETE entry for a purge of an already-soft-deleted row.
    pub fn purge(record: &EntityRecord, actor: &Actor, meta: &RequestMeta) -> Self {
        Self::new(actor, AuditAction::Delete, record.kind, record.id.clone())
            .snapshot_of(record)
            .request_meta(meta)
            .meta("soft_delete", Value::Bool(false))
            .meta("purge", Value::Bool(true))
    }

    fn snapshot_of(mut self, record: &EntityRecord) -> Self {
        self.entity_name = Some(safe_truncate_ellipsis(
            &record.name,
            crate::MAX_NAME_SNAPSHOT_CHARS,
        ));
        self.lab_id = record.lab_id.clone();
        self
    }

    fn request_meta(mut self, meta: &RequestMeta) -> Self {
        if let Some(address) = &meta.address {
            self.metadata
                .insert("address".to_string(), Value::String(address.clone()));
        }
        if let Some(client_id) = &meta.client_id {
            self.metadata
                .insert("client_id".to_string(), Value::String(client_id.clone()));
        }
        self
    }

    pub fn meta(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub(crate) fn into_record(self) -> AuditRecord {
        AuditRecord {
            id: Uuid::new_v4(),
            actor_id: self.actor_id,
            action: self.action,
            entity_kind: self.entity_kind,
            entity_id: self.entity_id,
            entity_name: self.entity_name,
            changes: self.changes,
            metadata: self.metadata,
            lab_id: self.lab_id,
            recorded_at: Utc::now(),
        }
    }
}
