// ABOUTME: Backup command - exports a full database snapshot to a .sql file
// ABOUTME: Validates up front, then dumps on a blocking task off the caller thread

use crate::cancel::CancelToken;
use crate::error::BackupError;
use crate::progress::ProgressReporter;
use crate::snapshot::{self, DumpSummary};
use crate::{sqlite, utils};
use anyhow::{Context, Result};
use chrono::Local;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where the dump landed and what it contains.
#[derive(Debug, Clone)]
pub struct BackupReport {
    pub path: PathBuf,
    pub summary: DumpSummary,
}

/// Create a snapshot backup of the database in `output_dir`.
///
/// Steps:
/// 1. Validates the database file and the backup directory; a failed check
///    is reported before anything is written.
/// 2. Enumerates tables from the catalog (name ascending).
/// 3. Writes `database_backup_<YYYYMMDD_HHMMSS>.sql` via the dump writer,
///    reporting per-table progress.
///
/// The engine runs on a blocking task so the caller never blocks. The
/// destination file is flushed and closed on the success path; on a write
/// failure the partial file is left on disk for the caller to inspect or
/// remove.
///
/// # Arguments
///
/// * `database` - Path to the Stockbook SQLite database file
/// * `output_dir` - Existing directory that receives the dump file
/// * `reporter` - Progress sink receiving 0-100 per-table percentages
/// * `cancel` - Cooperative cancellation, checked between tables
///
/// # Errors
///
/// Returns an error if the database file or backup directory is missing,
/// the catalog cannot be read, or writing the dump file fails.
pub async fn backup(
    database: &Path,
    output_dir: &Path,
    reporter: Arc<dyn ProgressReporter>,
    cancel: CancelToken,
) -> Result<BackupReport> {
    utils::validate_database_path(database)?;
    utils::validate_backup_dir(output_dir)?;

    let name = utils::database_display_name(database);
    let path = output_dir.join(utils::backup_filename(Local::now()));
    tracing::info!("Starting backup of '{}'...", name);
    tracing::info!("Writing dump to {}", path.display());

    let database = database.to_path_buf();
    let dump_path = path.clone();
    let summary = tokio::task::spawn_blocking(move || -> Result<DumpSummary, BackupError> {
        let conn = sqlite::open(&database)?;
        let tables = snapshot::list_tables(&conn)?;
        tracing::info!("Found {} table(s) to dump", tables.len());

        let file = File::create(&dump_path)?;
        let mut out = BufWriter::new(file);
        let summary = snapshot::write_dump(
            &conn,
            &name,
            &tables,
            &mut out,
            reporter.as_ref(),
            &cancel,
        )?;
        out.flush()?;
        Ok(summary)
    })
    .await
    .context("Backup task failed")??;

    if summary.cancelled {
        tracing::warn!(
            "⚠ Backup stopped early after {} table(s); the dump is incomplete",
            summary.tables_dumped
        );
    } else {
        tracing::info!(
            "✓ Backup complete: {} table(s), {} row(s) written to {}",
            summary.tables_dumped,
            summary.rows_dumped,
            path.display()
        );
    }

    Ok(BackupReport { path, summary })
}
