use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Every domain object subject to deletion, plus the tenancy roots.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Study,
    Task,
    Idea,
    Comment,
    Deadline,
    Bucket,
    TeamMembership,
    Lab,
    User,
}

impl EntityKind {
    /// Relation tag under which children of this kind are counted on their parent.
    pub fn relation_name(&self) -> &'static str {
        match self {
            EntityKind::Study => "studies",
            EntityKind::Task => "tasks",
            EntityKind::Idea => "ideas",
            EntityKind::Comment => "comments",
            EntityKind::Deadline => "deadlines",
            EntityKind::Bucket => "buckets",
            EntityKind::TeamMembership => "members",
            EntityKind::Lab => "labs",
            EntityKind::User => "users",
        }
    }
}

/// A stored row. `deleted_at` is the soft-deleted marker: `None` means live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRecord {
    pub id: String,
    pub kind: EntityKind,
    pub name: String,
    /// Owning lab, when the entity lives inside one.
    pub lab_id: Option<String>,
    /// Direct owner used for relation counting (a task's study, a study's bucket).
    pub parent_id: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl EntityRecord {
    pub fn new(kind: EntityKind, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            lab_id: None,
            parent_id: None,
            deleted_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn in_lab(mut self, lab_id: impl Into<String>) -> Self {
        self.lab_id = Some(lab_id.into());
        self
    }

    pub fn under(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn is_soft_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Pre-deletion identity snapshot returned to callers for confirmation messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: String,
    pub name: String,
}

impl EntitySnapshot {
    pub fn of(record: &EntityRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags_round_trip() {
        use std::str::FromStr;

        assert_eq!(EntityKind::TeamMembership.to_string(), "team_membership");
        assert_eq!(
            EntityKind::from_str("team_membership").unwrap(),
            EntityKind::TeamMembership
        );
        assert_eq!(EntityKind::from_str("study").unwrap(), EntityKind::Study);
    }

    #[test]
    fn test_record_builders() {
        let record = EntityRecord::new(EntityKind::Task, "t-1", "Sequence samples")
            .in_lab("lab-1")
            .under("s-1");

        assert_eq!(record.lab_id.as_deref(), Some("lab-1"));
        assert_eq!(record.parent_id.as_deref(), Some("s-1"));
        assert!(!record.is_soft_deleted());
    }
}
