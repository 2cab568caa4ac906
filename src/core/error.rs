use thiserror::Error;

use crate::archive::ArchiveError;
use crate::audit::AuditError;
use crate::deletion::DeletionError;
use crate::store::StoreError;

/// Crate-level error for embedding services that want a single failure channel.
///
/// Client-expected conditions (not found, blocked, throttled, not soft-deleted) are
/// outcome values on the respective operations, never variants here.
#[derive(Debug, Error)]
pub enum LabdeskError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("deletion error: {0}")]
    Deletion(#[from] DeletionError),

    #[error("archive error: {0}")]
    Archive(#[from] ArchiveError),

    #[error("audit error: {0}")]
    Audit(#[from] AuditError),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LabdeskError>;
