// ABOUTME: Error taxonomy for backup and restore operations
// ABOUTME: Fatal errors abort an operation; statement failures are aggregated, not raised

use thiserror::Error;

/// Fatal failures of a backup or restore operation.
///
/// Individual statement failures during a restore are deliberately absent
/// here: they are recovered locally and aggregated into
/// [`RestoreOutcome`](crate::snapshot::RestoreOutcome) instead of aborting
/// the run.
#[derive(Debug, Error)]
pub enum BackupError {
    /// The database catalog or an execution connection failed. Aborts the
    /// whole operation; never retried.
    #[error("database error: {0}")]
    Connection(#[from] rusqlite::Error),

    /// Reading or writing the dump file failed. Aborts the operation; any
    /// partial file is left on disk for the caller to clean up.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A pre-flight check failed (missing database file, missing output
    /// directory). Reported before the operation starts.
    #[error("{0}")]
    Validation(String),
}

impl BackupError {
    pub fn validation(msg: impl Into<String>) -> Self {
        BackupError::Validation(msg.into())
    }
}
