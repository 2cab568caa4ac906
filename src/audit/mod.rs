//! Immutable audit ledger for mutating operations.

pub mod models;
pub mod recorder;
pub mod store;

pub use models::{Actor, AuditAction, AuditDraft, AuditRecord, Change, RequestMeta};
pub use recorder::{AuditError, AuditRecorder};
pub use store::{AuditStore, AuditStoreError, InMemoryAuditStore};
