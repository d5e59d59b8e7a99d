// ABOUTME: SQLite connection handling for the Stockbook database file
// ABOUTME: Opens connections with sensible timeouts and helpful error messages

use crate::error::BackupError;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::Duration;

/// Open an existing Stockbook database file.
///
/// The connection is configured with a busy timeout so a restore does not
/// fail immediately when the desktop app briefly holds a write lock. The
/// caller owns the connection's lifecycle and must not share it with a
/// concurrent backup or restore.
pub fn open(path: &Path) -> Result<Connection, BackupError> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| translate_open_error(path, e))?;

    conn.busy_timeout(Duration::from_secs(5))?;
    Ok(conn)
}

/// Open a fresh in-memory database. Used by tests and dry runs.
pub fn open_in_memory() -> Result<Connection, BackupError> {
    Ok(Connection::open_in_memory()?)
}

fn translate_open_error(path: &Path, e: rusqlite::Error) -> BackupError {
    let msg = e.to_string();

    if msg.contains("unable to open database file") {
        BackupError::validation(format!(
            "Cannot open database file: {}\n\
             Please check:\n\
             - The file exists and is readable\n\
             - The containing directory is accessible",
            path.display()
        ))
    } else if msg.contains("file is not a database") {
        BackupError::validation(format!(
            "Not a SQLite database: {}\n\
             The file exists but does not look like a Stockbook database.",
            path.display()
        ))
    } else {
        BackupError::Connection(e)
    }
}
