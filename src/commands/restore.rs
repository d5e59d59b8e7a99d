// ABOUTME: Restore command - replays a snapshot script against the database
// ABOUTME: Confirmation-gated, best-effort, reports the failure count explicitly

use crate::cancel::CancelToken;
use crate::error::BackupError;
use crate::progress::ProgressReporter;
use crate::snapshot::{self, RestoreOutcome};
use crate::{sqlite, utils};
use anyhow::{bail, Context, Result};
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::path::Path;
use std::sync::Arc;

/// Restore a snapshot dump (or any compatible script) into the database.
///
/// Destructive: the script typically begins by dropping and recreating
/// tables, so the command is gated behind a confirmation prompt unless
/// `yes` is set. The replay itself is best-effort — an individual
/// statement's failure is recorded and skipped, never fatal — and the
/// returned [`RestoreOutcome`] carries the attempted/succeeded/failed
/// counts plus every failed statement's text, so the caller can tell
/// "fully restored" from "restored with N failures". The summary printed at
/// the end always states the failure count; a partial restore is never
/// announced as an unconditional success.
///
/// # Arguments
///
/// * `database` - Path to the target Stockbook SQLite database file
/// * `dump_file` - Script to replay, usually produced by the backup command
/// * `yes` - Skip the confirmation prompt
/// * `reporter` - Progress sink receiving 0-100 per-statement percentages
/// * `cancel` - Cooperative cancellation, checked between statements
///
/// # Errors
///
/// Returns an error if a pre-flight check fails, the user declines the
/// prompt, the script cannot be read, or the database connection is lost.
/// Statement-level failures do not error; they are aggregated in the
/// outcome.
pub async fn restore(
    database: &Path,
    dump_file: &Path,
    yes: bool,
    reporter: Arc<dyn ProgressReporter>,
    cancel: CancelToken,
) -> Result<RestoreOutcome> {
    utils::validate_database_path(database)?;
    if !dump_file.is_file() {
        return Err(BackupError::validation(format!(
            "dump file does not exist: {}",
            dump_file.display()
        ))
        .into());
    }

    if !yes {
        let proceed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Replaying '{}' will drop and recreate tables in '{}'. Continue?",
                dump_file.display(),
                database.display()
            ))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !proceed {
            bail!("Restore cancelled by user");
        }
    }

    tracing::info!("Reading script from {}", dump_file.display());
    let script = std::fs::read_to_string(dump_file)
        .map_err(BackupError::Io)
        .context("Failed to read dump file")?;

    let statements = snapshot::split_script(&script);
    if statements.is_empty() {
        tracing::warn!("⚠ Script contains no statements, nothing to restore");
        return Ok(RestoreOutcome::default());
    }
    tracing::info!("Replaying {} statement(s)...", statements.len());

    let database = database.to_path_buf();
    let outcome = tokio::task::spawn_blocking(move || -> Result<RestoreOutcome, BackupError> {
        let conn = sqlite::open(&database)?;
        snapshot::replay(&conn, &statements, reporter.as_ref(), &cancel)
    })
    .await
    .context("Restore task failed")??;

    report_outcome(&outcome);
    Ok(outcome)
}

fn report_outcome(outcome: &RestoreOutcome) {
    tracing::info!("========================================");
    tracing::info!("Restore Summary");
    tracing::info!("========================================");
    tracing::info!("Attempted: {}", outcome.attempted);
    tracing::info!("Succeeded: {}", outcome.succeeded);
    tracing::info!("Failed:    {}", outcome.failed_count());
    tracing::info!("========================================");

    for failed in &outcome.failed {
        tracing::warn!(
            "  ✗ statement {}: {} — {}",
            failed.index + 1,
            preview(&failed.text),
            failed.error
        );
    }

    if outcome.cancelled {
        tracing::warn!(
            "⚠ Restore stopped early after {} attempted statement(s)",
            outcome.attempted
        );
    } else if outcome.failed.is_empty() {
        tracing::info!("✓ Restore complete: all {} statement(s) applied", outcome.succeeded);
    } else {
        tracing::warn!(
            "⚠ Restore finished with {} failed statement(s); the database reflects a partial replay",
            outcome.failed_count()
        );
    }
}

/// First line of a statement, shortened for the log.
fn preview(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or("");
    let mut chars = first_line.chars();
    let mut shown: String = chars.by_ref().take(60).collect();
    let truncated = chars.next().is_some() || first_line.len() < text.len();
    if truncated {
        shown.push('…');
    }
    shown
}
