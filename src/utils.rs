// ABOUTME: Utility functions for pre-flight validation and naming conventions
// ABOUTME: Provides path checks, backup filename generation, and identifier quoting

use crate::error::BackupError;
use chrono::{DateTime, Local};
use std::path::Path;

/// Validate that a database file exists before an operation starts.
///
/// # Examples
///
/// ```
/// # use stockbook_backup::utils::validate_database_path;
/// assert!(validate_database_path("/no/such/stockbook.db".as_ref()).is_err());
/// ```
pub fn validate_database_path(path: &Path) -> Result<(), BackupError> {
    if !path.is_file() {
        return Err(BackupError::validation(format!(
            "database file does not exist: {}",
            path.display()
        )));
    }
    Ok(())
}

/// Validate that the chosen backup directory exists.
///
/// The operation never begins when this fails; no partial output is created.
pub fn validate_backup_dir(dir: &Path) -> Result<(), BackupError> {
    if !dir.is_dir() {
        return Err(BackupError::validation(format!(
            "backup directory does not exist: {}",
            dir.display()
        )));
    }
    Ok(())
}

/// Build the conventional backup filename for a given moment:
/// `database_backup_<YYYYMMDD_HHMMSS>.sql`.
///
/// # Examples
///
/// ```
/// # use stockbook_backup::utils::backup_filename;
/// use chrono::{Local, TimeZone};
/// let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 30, 5).unwrap();
/// assert_eq!(backup_filename(at), "database_backup_20240309_143005.sql");
/// ```
pub fn backup_filename(at: DateTime<Local>) -> String {
    format!("database_backup_{}.sql", at.format("%Y%m%d_%H%M%S"))
}

/// Quote an identifier for embedding in a generated statement.
///
/// Backtick quoting matches the dump format; a backtick inside the name is
/// escaped by doubling.
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Derive the display name of a database from its file path.
///
/// Used for the `-- Database: <name>` header line of a dump.
pub fn database_display_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
