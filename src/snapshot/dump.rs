// ABOUTME: Dump writer that composes a full snapshot document from a table list
// ABOUTME: Emits DDL verbatim plus batched multi-row INSERTs, with per-table progress

use crate::cancel::CancelToken;
use crate::error::BackupError;
use crate::progress::ProgressReporter;
use crate::snapshot::encode::encode_value;
use crate::snapshot::schema::TableDescriptor;
use crate::utils::quote_ident;
use chrono::Local;
use rusqlite::types::Value;
use rusqlite::Connection;
use std::io::Write;

/// Upper bound on rows per generated INSERT statement. Keeps statement size
/// bounded for large tables instead of serializing a whole table into one
/// statement.
pub const INSERT_BATCH_ROWS: usize = 500;

/// What one export run produced.
#[derive(Debug, Clone, Default)]
pub struct DumpSummary {
    pub tables_dumped: usize,
    pub rows_dumped: u64,
    /// True when cancellation stopped the run before every table was
    /// written. The output holds only the tables written so far.
    pub cancelled: bool,
}

/// Compose a full snapshot document for `tables`, in the given order.
///
/// Per table: a structure comment, `DROP TABLE IF EXISTS`, the verbatim
/// `CREATE TABLE` statement, and — only when the table holds rows — a data
/// comment followed by multi-row INSERT statements of at most
/// [`INSERT_BATCH_ROWS`] rows each. A table with zero rows gets no data
/// section at all, so a restore consumer can tell "intentionally empty"
/// apart from "data omitted".
///
/// Progress is reported after each table completes, proportional to tables
/// finished. Cancellation is checked between tables; the table being written
/// is finished first.
pub fn write_dump<W: Write>(
    conn: &Connection,
    database_name: &str,
    tables: &[TableDescriptor],
    out: &mut W,
    reporter: &dyn ProgressReporter,
    cancel: &CancelToken,
) -> Result<DumpSummary, BackupError> {
    writeln!(
        out,
        "-- Database backup created on {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(out, "-- Database: {}", database_name)?;
    writeln!(out)?;

    let mut summary = DumpSummary::default();
    let total = tables.len();

    for (i, table) in tables.iter().enumerate() {
        if cancel.is_cancelled() {
            summary.cancelled = true;
            break;
        }

        write_table(conn, table, out, &mut summary)?;
        summary.tables_dumped += 1;
        reporter.report((((i + 1) * 100) / total) as u8);
    }

    Ok(summary)
}

fn write_table<W: Write>(
    conn: &Connection,
    table: &TableDescriptor,
    out: &mut W,
    summary: &mut DumpSummary,
) -> Result<(), BackupError> {
    writeln!(out, "-- Table structure for {}", table.name)?;
    writeln!(out, "DROP TABLE IF EXISTS {};", quote_ident(&table.name))?;
    writeln!(out, "{};", table.create_sql)?;
    writeln!(out)?;

    // Zero rows: no data section. An empty INSERT would be indistinguishable
    // from "table intentionally left empty by restore".
    if table.row_count == 0 {
        return Ok(());
    }

    writeln!(out, "-- Dumping data for table {}", table.name)?;

    let column_list = table
        .columns
        .iter()
        .map(|c| quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ");

    let query = format!(
        "SELECT {} FROM {}",
        column_list,
        quote_ident(&table.name)
    );
    let mut stmt = conn.prepare(&query)?;
    let mut rows = stmt.query([])?;

    let mut batch: Vec<String> = Vec::new();
    while let Some(row) = rows.next()? {
        let mut literals = Vec::with_capacity(table.columns.len());
        for idx in 0..table.columns.len() {
            let value: Value = row.get(idx)?;
            literals.push(encode_value(&value));
        }
        batch.push(format!("({})", literals.join(", ")));

        if batch.len() == INSERT_BATCH_ROWS {
            write_insert(out, &table.name, &column_list, &batch)?;
            summary.rows_dumped += batch.len() as u64;
            batch.clear();
        }
    }

    if !batch.is_empty() {
        write_insert(out, &table.name, &column_list, &batch)?;
        summary.rows_dumped += batch.len() as u64;
    }

    writeln!(out)?;
    Ok(())
}

fn write_insert<W: Write>(
    out: &mut W,
    table: &str,
    column_list: &str,
    tuples: &[String],
) -> Result<(), BackupError> {
    writeln!(
        out,
        "INSERT INTO {} ({}) VALUES",
        quote_ident(table),
        column_list
    )?;
    writeln!(out, "{};", tuples.join(",\n"))?;
    Ok(())
}
