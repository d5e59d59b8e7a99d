// ABOUTME: Schema introspection over the SQLite catalog
// ABOUTME: Discovers tables, their verbatim DDL, ordered columns, and row counts

use crate::error::BackupError;
use crate::utils::quote_ident;
use rusqlite::Connection;

/// Structural definition and metadata of one table, as reported by the
/// catalog at introspection time. Immutable once built.
#[derive(Debug, Clone)]
pub struct TableDescriptor {
    pub name: String,
    /// Column names in table order.
    pub columns: Vec<String>,
    /// The `CREATE TABLE` statement exactly as stored in `sqlite_master`.
    /// Trusted verbatim, never reconstructed column by column.
    pub create_sql: String,
    pub row_count: i64,
}

/// Enumerate all user tables, ordered by name ascending.
///
/// A catalog query error is fatal for the whole call and is surfaced as
/// [`BackupError::Connection`]; it is not retried.
pub fn list_tables(conn: &Connection) -> Result<Vec<TableDescriptor>, BackupError> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
         ORDER BY name",
    )?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    let mut tables = Vec::with_capacity(names.len());
    for name in names {
        let create_sql = create_statement(conn, &name)?;
        let columns = table_columns(conn, &name)?;
        let row_count = count_rows(conn, &name)?;
        tables.push(TableDescriptor {
            name,
            columns,
            create_sql,
            row_count,
        });
    }

    Ok(tables)
}

/// Fetch a table's definition statement exactly as the catalog reports it.
pub fn create_statement(conn: &Connection, table: &str) -> Result<String, BackupError> {
    let sql = conn.query_row(
        "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [table],
        |row| row.get::<_, String>(0),
    )?;
    Ok(sql)
}

/// Column names in table order, from `pragma_table_info`.
fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>, BackupError> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid")?;
    let columns = stmt
        .query_map([table], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns)
}

fn count_rows(conn: &Connection, table: &str) -> Result<i64, BackupError> {
    let count = conn.query_row(
        &format!("SELECT COUNT(*) FROM {}", quote_ident(table)),
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}
