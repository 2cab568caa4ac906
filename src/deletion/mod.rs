//! Destructive deletion: dependency checking, policy-selected soft/hard mutation,
//! audit trail.

pub mod dependencies;
pub mod hard;
pub mod manager;
pub mod models;
pub mod soft;

pub use dependencies::{DependencyChecker, DependencyError};
pub use hard::hard_delete;
pub use manager::DeletionManager;
pub use models::{DeleteOutcome, DeletionError, DependencyReport, RelationCount};
pub use soft::{restore, soft_delete};
