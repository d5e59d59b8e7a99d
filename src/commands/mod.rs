// ABOUTME: Command implementations for the backup tool
// ABOUTME: Exports backup, restore, and tables commands

pub mod backup;
pub mod restore;
pub mod tables;

pub use backup::{backup, BackupReport};
pub use restore::restore;
pub use tables::tables;
