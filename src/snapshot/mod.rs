// ABOUTME: Snapshot engine module
// ABOUTME: Handles schema introspection, dump writing, script splitting, and replay

pub mod dump;
pub mod encode;
pub mod restore;
pub mod schema;
pub mod split;

pub use dump::{write_dump, DumpSummary, INSERT_BATCH_ROWS};
pub use encode::encode_value;
pub use restore::{replay, FailedStatement, RestoreOutcome};
pub use schema::{create_statement, list_tables, TableDescriptor};
pub use split::{split_script, Statement};
