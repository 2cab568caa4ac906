use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::policy::{DeleteMode, RelationPolicy, default_blocking_relations, default_deletion_policy};
use crate::store::EntityKind;

/// Ceiling and window for one operation class.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WindowLimit {
    pub ceiling: u32,
    pub window_seconds: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RateLimitSettings {
    pub destructive: WindowLimit,
    pub general: WindowLimit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    pub rate_limits: RateLimitSettings,

    /// Per-kind soft/hard split. Complete by construction; a kind missing from an
    /// externally supplied table is a wiring defect, not a runtime condition.
    pub deletion_policy: HashMap<EntityKind, DeleteMode>,

    /// Declared child relations per kind, blocking or informational.
    pub blocking_relations: HashMap<EntityKind, Vec<RelationPolicy>>,

    /// Days a soft-deleted row is retained before it becomes eligible for purge.
    pub retention_days: i64,
}

impl CoreConfig {
    pub fn new() -> Self {
        Self {
            rate_limits: RateLimitSettings {
                destructive: WindowLimit {
                    ceiling: crate::DEFAULT_DESTRUCTIVE_CEILING,
                    window_seconds: crate::DEFAULT_WINDOW_SECONDS,
                },
                general: WindowLimit {
                    ceiling: crate::DEFAULT_GENERAL_CEILING,
                    window_seconds: crate::DEFAULT_WINDOW_SECONDS,
                },
            },
            deletion_policy: default_deletion_policy(),
            blocking_relations: default_blocking_relations(),
            retention_days: crate::DEFAULT_RETENTION_DAYS,
        }
    }

    pub fn from_env() -> Self {
        let mut config = Self::new();

        if let Some(ceiling) = parse_env("LABDESK_DESTRUCTIVE_CEILING") {
            config.rate_limits.destructive.ceiling = ceiling;
        }
        if let Some(secs) = parse_env("LABDESK_DESTRUCTIVE_WINDOW_SECS") {
            config.rate_limits.destructive.window_seconds = secs;
        }
        if let Some(ceiling) = parse_env("LABDESK_GENERAL_CEILING") {
            config.rate_limits.general.ceiling = ceiling;
        }
        if let Some(secs) = parse_env("LABDESK_GENERAL_WINDOW_SECS") {
            config.rate_limits.general.window_seconds = secs;
        }
        if let Some(days) = parse_env("LABDESK_RETENTION_DAYS") {
            config.retention_days = days;
        }

        config
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
