//! Built-in soft/hard and blocking-relation tables.
//!
//! Container kinds (study, bucket, lab) hard-delete once empty; leaf content
//! soft-deletes and stays recoverable until purged.

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::store::EntityKind;

/// How a kind is removed when the orchestrator reaches the mutation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DeleteMode {
    /// Set the deleted marker; the row stays and can be restored.
    Soft,
    /// Remove the row permanently.
    Hard,
}

/// One declared child relation of a kind. Non-blocking relations are still counted and
/// reported so callers can render a full picture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationPolicy {
    pub relation: String,
    pub blocking: bool,
}

impl RelationPolicy {
    pub fn blocking(relation: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            blocking: true,
        }
    }

    pub fn informational(relation: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            blocking: false,
        }
    }
}

lazy_static! {
    static ref DELETION_POLICY: HashMap<EntityKind, DeleteMode> = {
        let mut table = HashMap::new();
        table.insert(EntityKind::Study, DeleteMode::Hard);
        table.insert(EntityKind::Bucket, DeleteMode::Hard);
        table.insert(EntityKind::Lab, DeleteMode::Hard);
        table.insert(EntityKind::Task, DeleteMode::Soft);
        table.insert(EntityKind::Idea, DeleteMode::Soft);
        table.insert(EntityKind::Comment, DeleteMode::Soft);
        table.insert(EntityKind::Deadline, DeleteMode::Soft);
        table.insert(EntityKind::TeamMembership, DeleteMode::Soft);
        table.insert(EntityKind::User, DeleteMode::Soft);
        table
    };
    static ref BLOCKING_RELATIONS: HashMap<EntityKind, Vec<RelationPolicy>> = {
        let mut table = HashMap::new();
        table.insert(
            EntityKind::Study,
            vec![
                RelationPolicy::blocking("tasks"),
                RelationPolicy::blocking("comments"),
                RelationPolicy::blocking("members"),
                RelationPolicy::informational("ideas"),
                RelationPolicy::informational("deadlines"),
            ],
        );
        table.insert(EntityKind::Bucket, vec![RelationPolicy::blocking("studies")]);
        table.insert(
            EntityKind::Lab,
            vec![
                RelationPolicy::blocking("studies"),
                RelationPolicy::blocking("members"),
                RelationPolicy::blocking("buckets"),
            ],
        );
        table.insert(EntityKind::User, vec![RelationPolicy::blocking("members")]);
        table.insert(EntityKind::Task, Vec::new());
        table.insert(EntityKind::Idea, Vec::new());
        table.insert(EntityKind::Comment, Vec::new());
        table.insert(EntityKind::Deadline, Vec::new());
        table.insert(EntityKind::TeamMembership, Vec::new());
        table
    };
}

pub fn default_deletion_policy() -> HashMap<EntityKind, DeleteMode> {
    DELETION_POLICY.clone()
}

pub fn default_blocking_relations() -> HashMap<EntityKind, Vec<RelationPolicy>> {
    BLOCKING_RELATIONS.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_kind_has_a_delete_mode() {
        let policy = default_deletion_policy();
        for kind in EntityKind::iter() {
            assert!(policy.contains_key(&kind), "no delete mode for {kind}");
        }
    }

    #[test]
    fn test_container_kinds_hard_delete() {
        let policy = default_deletion_policy();
        for kind in [EntityKind::Study, EntityKind::Bucket, EntityKind::Lab] {
            assert_eq!(policy[&kind], DeleteMode::Hard);
        }
        assert_eq!(policy[&EntityKind::Task], DeleteMode::Soft);
        assert_eq!(policy[&EntityKind::User], DeleteMode::Soft);
    }

    #[test]
    fn test_study_relations_include_informational() {
        let relations = default_blocking_relations();
        let study = &relations[&EntityKind::Study];
        assert!(study.iter().any(|r| r.relation == "tasks" && r.blocking));
        assert!(study.iter().any(|r| r.relation == "ideas" && !r.blocking));
    }
}
