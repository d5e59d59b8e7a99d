// ABOUTME: Tables command - lists user tables and row counts from the catalog
// ABOUTME: The introspection surface the desktop UI refreshes from

use crate::error::BackupError;
use crate::snapshot::{self, TableDescriptor};
use crate::{sqlite, utils};
use anyhow::{Context, Result};
use std::path::Path;

/// List the database's tables with their row counts.
pub async fn tables(database: &Path) -> Result<()> {
    utils::validate_database_path(database)?;

    let path = database.to_path_buf();
    let tables = tokio::task::spawn_blocking(move || -> Result<Vec<TableDescriptor>, BackupError> {
        let conn = sqlite::open(&path)?;
        snapshot::list_tables(&conn)
    })
    .await
    .context("Introspection task failed")??;

    if tables.is_empty() {
        tracing::warn!("⚠ No user tables found in {}", database.display());
        return Ok(());
    }

    print_table_listing(&tables);
    Ok(())
}

fn print_table_listing(tables: &[TableDescriptor]) {
    let total_rows: i64 = tables.iter().map(|t| t.row_count).sum();

    println!();
    println!("{:<28} {:>10}", "Table", "Rows");
    println!("{}", "─".repeat(40));
    for table in tables {
        println!("{:<28} {:>10}", table.name, table.row_count);
    }
    println!("{}", "─".repeat(40));
    println!("Total: {} table(s), {} row(s)", tables.len(), total_rows);
    println!();
}
