//! Deletion, audit and retention core for research-lab operations.
//!
//! An in-process async library that route handlers call to delete entities safely
//! (rate-limited, dependency-checked, audited), restore or purge soft-deleted rows,
//! and list rows approaching their retention deadline. Authentication, authorization
//! and response formatting live with the caller.

pub mod archive;
pub mod audit;
pub mod core;
pub mod deletion;
pub mod ratelimit;
pub mod store;
pub mod utils;

pub use utils::{init_tracing, safe_truncate, safe_truncate_ellipsis};

pub use crate::core::config::{CoreConfig, RateLimitSettings, WindowLimit};
pub use crate::core::error::{LabdeskError, Result};
pub use crate::core::policy::{DeleteMode, RelationPolicy};

pub use archive::{ArchiveManager, ExpiringEntity, PurgeOutcome, RestoreOutcome};
pub use audit::{Actor, AuditAction, AuditRecord, AuditRecorder, InMemoryAuditStore, RequestMeta};
pub use deletion::{DeleteOutcome, DeletionManager, DependencyReport};
pub use ratelimit::{InMemoryRateLimitStore, OperationClass, RateDecision, RateLimiter};
pub use store::{EntityKind, EntityRecord, EntityStore, InMemoryStore};

/// Destructive operations allowed per actor per window.
pub const DEFAULT_DESTRUCTIVE_CEILING: u32 = 5;

/// General operations allowed per actor per window.
pub const DEFAULT_GENERAL_CEILING: u32 = 60;

/// Rate-limit window length in seconds.
pub const DEFAULT_WINDOW_SECONDS: u64 = 60;

/// Days a soft-deleted row is retained before it becomes eligible for purge.
pub const DEFAULT_RETENTION_DAYS: i64 = 30;

/// Longest entity-name snapshot stored on an audit record.
pub const MAX_NAME_SNAPSHOT_CHARS: usize = 120;
