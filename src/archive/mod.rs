//! Soft-deleted row lifecycle: expiry listing, restore, purge.

pub mod manager;
pub mod models;

pub use manager::ArchiveManager;
pub use models::{ArchiveError, ExpiringEntity, PurgeOutcome, RestoreOutcome};
