use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::{EntityKind, EntitySnapshot, StoreError};

/// Live count of one declared relation at check time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationCount {
    pub relation: String,
    pub count: u64,
    pub blocking: bool,
}

/// Transient per-attempt report. Every declared relation appears, blocking or not, so
/// callers can tell the user exactly what stands in the way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyReport {
    pub counts: Vec<RelationCount>,
}

impl DependencyReport {
    pub fn is_blocked(&self) -> bool {
        self.counts.iter().any(|c| c.blocking && c.count > 0)
    }

    /// Non-zero blocking counts keyed by relation, the §6 `dependencies` payload.
    pub fn blocking_counts(&self) -> BTreeMap<String, u64> {
        self.counts
            .iter()
            .filter(|c| c.blocking && c.count > 0)
            .map(|c| (c.relation.clone(), c.count))
            .collect()
    }

    /// Human-readable obstruction list, e.g. "3 tasks, 2 comments".
    pub fn summary(&self) -> String {
        self.counts
            .iter()
            .filter(|c| c.blocking && c.count > 0)
            .map(|c| format!("{} {}", c.count, c.relation))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Typed result of one deletion attempt. Client-expected rejections are variants here,
/// not errors; route handlers map them to 429/400/404.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeleteOutcome {
    Deleted {
        entity: EntitySnapshot,
        soft_deleted: bool,
    },
    RateLimited {
        retry_after_secs: u64,
    },
    HasDependencies {
        report: DependencyReport,
    },
    NotFound,
}

#[derive(Debug, Error)]
pub enum DeletionError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A kind missing from an externally supplied policy table. Wiring defect, not a
    /// runtime condition to recover from.
    #[error("unsupported entity kind: {0}")]
    UnsupportedKind(EntityKind),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> DependencyReport {
        DependencyReport {
            counts: vec![
                RelationCount {
                    relation: "tasks".into(),
                    count: 3,
                    blocking: true,
                },
                RelationCount {
                    relation: "comments".into(),
                    count: 2,
                    blocking: true,
                },
                RelationCount {
                    relation: "ideas".into(),
                    count: 7,
                    blocking: false,
                },
                RelationCount {
                    relation: "members".into(),
                    count: 0,
                    blocking: true,
                },
            ],
        }
    }

    #[test]
    fn test_blocking_ignores_informational_relations() {
        let mut report = report();
        assert!(report.is_blocked());

        for count in &mut report.counts {
            if count.blocking {
                count.count = 0;
            }
        }
        // Seven ideas remain but none of them block.
        assert!(!report.is_blocked());
    }

    #[test]
    fn test_summary_lists_only_obstructions() {
        let report = report();
        assert_eq!(report.summary(), "3 tasks, 2 comments");
        assert_eq!(report.blocking_counts().len(), 2);
        assert_eq!(report.blocking_counts()["tasks"], 3);
    }

    #[test]
    fn test_outcome_serializes_with_code_tag() {
        let json = serde_json::to_value(DeleteOutcome::NotFound).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");

        let json = serde_json::to_value(DeleteOutcome::RateLimited {
            retry_after_secs: 12,
        })
        .unwrap();
        assert_eq!(json["code"], "RATE_LIMITED");
        assert_eq!(json["retry_after_secs"], 12);
    }
}
