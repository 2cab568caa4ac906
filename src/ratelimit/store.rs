use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

use super::models::{RateDecision, WindowState};

/// Counter storage seam. The in-process map under-enforces limits across horizontally
/// scaled instances; a shared external counter implementing this trait fixes that
/// without touching the limiter.
///
/// `try_acquire` must be atomic per key: reset-check, ceiling-check and increment happen
/// as one step so two concurrent calls can never both read "4 of 5" and proceed.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    async fn try_acquire(
        &self,
        key: &str,
        ceiling: u32,
        window: Duration,
        now: DateTime<Utc>,
    ) -> RateDecision;
}

#[derive(Default)]
pub struct InMemoryRateLimitStore {
    windows: Mutex<HashMap<String, WindowState>>,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RateLimitStore for InMemoryRateLimitStore {
    async fn try_acquire(
        &self,
        key: &str,
        ceiling: u32,
        window: Duration,
        now: DateTime<Utc>,
    ) -> RateDecision {
        let mut windows = self.windows.lock();
        let state = windows.entry(key.to_string()).or_insert(WindowState {
            count: 0,
            window_started_at: now,
        });

        if now - state.window_started_at >= window {
            state.count = 0;
            state.window_started_at = now;
        }

        if state.count < ceiling {
            state.count += 1;
            RateDecision::Allowed {
                remaining: ceiling - state.count,
            }
        } else {
            let remaining = window - (now - state.window_started_at);
            RateDecision::Throttled {
                retry_after_secs: remaining.num_seconds().max(1) as u64,
            }
        }
    }
}
