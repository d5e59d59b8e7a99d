// ABOUTME: SQLite connection utilities module
// ABOUTME: Handles opening database files and connection configuration

pub mod connection;

pub use connection::{open, open_in_memory};
