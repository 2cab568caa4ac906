use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Destructive operations are throttled far more strictly than reads and writes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OperationClass {
    Destructive,
    General,
}

/// Decision value: the limiter never fails, it answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateDecision {
    Allowed { remaining: u32 },
    Throttled { retry_after_secs: u64 },
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateDecision::Allowed { .. })
    }
}

/// Counter state for one (actor, class) key. Fixed window anchored at the first call;
/// fully reset once the window elapses. Adjacent windows can therefore admit up to 2×
/// the ceiling back to back; that tradeoff is accepted, see the limiter docs.
#[derive(Debug, Clone, Copy)]
pub struct WindowState {
    pub count: u32,
    pub window_started_at: DateTime<Utc>,
}
