use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use super::models::{OperationClass, RateDecision};
use super::store::RateLimitStore;
use crate::core::config::RateLimitSettings;

/// Fixed-window limiter keyed by (actor, operation class).
///
/// The window is anchored at the first call and reset wholesale when it elapses, so two
/// adjacent windows can admit up to twice the ceiling. That is a deliberate
/// simplicity/throughput tradeoff, not a bug; swap the store for a sliding-log
/// implementation if strict pacing is ever required.
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
    settings: RateLimitSettings,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn RateLimitStore>, settings: RateLimitSettings) -> Self {
        Self { store, settings }
    }

    pub async fn check_and_increment(
        &self,
        actor_id: &str,
        class: OperationClass,
    ) -> RateDecision {
        self.check_at(actor_id, class, Utc::now()).await
    }

    /// Time-injectable entry point; production callers go through
    /// [`check_and_increment`](Self::check_and_increment).
    pub async fn check_at(
        &self,
        actor_id: &str,
        class: OperationClass,
        now: DateTime<Utc>,
    ) -> RateDecision {
        let limit = match class {
            OperationClass::Destructive => self.settings.destructive,
            OperationClass::General => self.settings.general,
        };
        let key = format!("{}:{}", actor_id, class);
        let window = Duration::seconds(limit.window_seconds as i64);

        let decision = self.store.try_acquire(&key, limit.ceiling, window, now).await;
        match decision {
            RateDecision::Allowed { remaining } => {
                debug!("Rate check passed for {} ({} remaining)", key, remaining);
            }
            RateDecision::Throttled { retry_after_secs } => {
                warn!(
                    "Rate limit hit for {} - retry in {}s",
                    key, retry_after_secs
                );
            }
        }
        decision
    }
}
