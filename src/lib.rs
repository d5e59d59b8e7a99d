// ABOUTME: Library module for stockbook-backup
// ABOUTME: Exports all core functionality for use in binary and tests

pub mod cancel;
pub mod commands;
pub mod error;
pub mod progress;
pub mod snapshot;
pub mod sqlite;
pub mod utils;
