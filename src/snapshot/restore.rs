// ABOUTME: Restore executor that replays statements with per-statement fault isolation
// ABOUTME: Best-effort sequential replay; failures are aggregated, never fatal

use crate::cancel::CancelToken;
use crate::error::BackupError;
use crate::progress::ProgressReporter;
use crate::snapshot::split::Statement;
use rusqlite::Connection;

/// A statement that failed during replay, kept for diagnosis.
#[derive(Debug, Clone)]
pub struct FailedStatement {
    pub index: usize,
    pub text: String,
    pub error: String,
}

/// Result of one restore run, built incrementally while replaying and
/// read-only to the caller afterward.
#[derive(Debug, Clone, Default)]
pub struct RestoreOutcome {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: Vec<FailedStatement>,
    /// True when cancellation stopped the run before every statement was
    /// attempted. Distinct from "completed with failures".
    pub cancelled: bool,
}

impl RestoreOutcome {
    /// Every statement was attempted and none failed.
    pub fn is_clean(&self) -> bool {
        !self.cancelled && self.failed.is_empty()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }
}

/// Replay statements against the target database, strictly in sequence.
///
/// Best-effort contract: a statement's execution failure is caught, its text
/// is recorded in the outcome, and the run continues with the next
/// statement. The whole run executes inside one transaction with a single
/// commit at the end; failed statements do not roll back earlier successes,
/// so the database may end up reflecting only part of the script. The
/// outcome lets the caller tell "fully restored" from "restored with N
/// failures".
///
/// Progress is reported once per attempted statement. Cancellation is
/// checked between statements; work already applied is still committed.
pub fn replay(
    conn: &Connection,
    statements: &[Statement],
    reporter: &dyn ProgressReporter,
    cancel: &CancelToken,
) -> Result<RestoreOutcome, BackupError> {
    let mut outcome = RestoreOutcome::default();
    let total = statements.len();
    if total == 0 {
        return Ok(outcome);
    }

    let tx = conn.unchecked_transaction()?;

    for (i, statement) in statements.iter().enumerate() {
        if cancel.is_cancelled() {
            outcome.cancelled = true;
            break;
        }

        outcome.attempted += 1;
        match tx.execute(&statement.text, []) {
            Ok(_) => outcome.succeeded += 1,
            Err(e) => {
                tracing::warn!(
                    "Statement {}/{} failed, continuing: {}",
                    statement.index + 1,
                    total,
                    e
                );
                outcome.failed.push(FailedStatement {
                    index: statement.index,
                    text: statement.text.clone(),
                    error: e.to_string(),
                });
            }
        }

        reporter.report(percent(i + 1, total));
    }

    tx.commit()?;
    Ok(outcome)
}

fn percent(done: usize, total: usize) -> u8 {
    ((done * 100) / total) as u8
}
