// ABOUTME: Integration tests for the full backup and restore workflow
// ABOUTME: Exercises dump, split, and replay end-to-end against temporary databases

use rusqlite::types::Value;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use stockbook_backup::cancel::CancelToken;
use stockbook_backup::commands;
use stockbook_backup::progress::{NoProgress, ProgressReporter};
use stockbook_backup::snapshot;

/// Build a small inventory database with awkward values: quotes,
/// backslashes, NULLs, reals, blobs, and one deliberately empty table.
fn create_fixture_db(dir: &Path) -> PathBuf {
    let path = dir.join("stockbook.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE categories (id INTEGER PRIMARY KEY, label TEXT);
         CREATE TABLE products (id INTEGER PRIMARY KEY, name TEXT NOT NULL, price REAL, qty INTEGER);
         CREATE TABLE sales (id INTEGER PRIMARY KEY, product_id INTEGER, note TEXT, receipt BLOB);",
    )
    .unwrap();
    conn.execute(
        "INSERT INTO products (id, name, price, qty) VALUES
         (1, 'Shampoo', 10.5, 10),
         (2, 'O''Brien Oil', 5.0, 5),
         (3, 'Label C:\\stock\\share', NULL, 0)",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO sales (id, product_id, note, receipt) VALUES
         (1, 2, NULL, X'DEADBEEF'),
         (2, 1, 'paid; cash', NULL)",
        [],
    )
    .unwrap();
    path
}

fn all_rows(conn: &Connection, table: &str) -> Vec<Vec<Value>> {
    let mut stmt = conn
        .prepare(&format!("SELECT * FROM {} ORDER BY id", table))
        .unwrap();
    let column_count = stmt.column_count();
    let rows = stmt
        .query_map([], |row| {
            let mut values = Vec::with_capacity(column_count);
            for i in 0..column_count {
                values.push(row.get::<_, Value>(i)?);
            }
            Ok(values)
        })
        .unwrap();
    rows.collect::<Result<Vec<_>, _>>().unwrap()
}

#[tokio::test]
async fn test_backup_writes_dump_with_expected_shape() {
    let dir = tempfile::tempdir().unwrap();
    let db = create_fixture_db(dir.path());

    let report = commands::backup(&db, dir.path(), Arc::new(NoProgress), CancelToken::new())
        .await
        .unwrap();

    let file_name = report.path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(file_name.starts_with("database_backup_"));
    assert!(file_name.ends_with(".sql"));
    assert_eq!(report.summary.tables_dumped, 3);
    assert_eq!(report.summary.rows_dumped, 5);
    assert!(!report.summary.cancelled);

    let dump = std::fs::read_to_string(&report.path).unwrap();
    assert!(dump.starts_with("-- Database backup created on "));
    assert!(dump.contains("-- Database: stockbook"));
    assert!(dump.contains("-- Table structure for products"));
    assert!(dump.contains("DROP TABLE IF EXISTS `products`;"));
    assert!(dump.contains("INSERT INTO `products` (`id`, `name`, `price`, `qty`) VALUES"));
    assert!(dump.contains("'O''Brien Oil'"));

    // Empty table: DDL present, no data section at all
    assert!(dump.contains("-- Table structure for categories"));
    assert!(!dump.contains("INSERT INTO `categories`"));
    assert!(!dump.contains("-- Dumping data for table categories"));
}

#[tokio::test]
async fn test_round_trip_reproduces_row_sets() {
    let dir = tempfile::tempdir().unwrap();
    let source = create_fixture_db(dir.path());

    let report = commands::backup(&source, dir.path(), Arc::new(NoProgress), CancelToken::new())
        .await
        .unwrap();

    // Restore into a brand-new empty database
    let target = dir.path().join("restored.db");
    Connection::open(&target).unwrap();

    let outcome = commands::restore(
        &target,
        &report.path,
        true,
        Arc::new(NoProgress),
        CancelToken::new(),
    )
    .await
    .unwrap();

    // The note 'paid; cash' trips the naive splitter: the terminator inside
    // the literal cuts the sales INSERT into two fragments, and both fail.
    // Every other statement must apply.
    assert_eq!(outcome.failed_count(), 2);
    assert_eq!(outcome.succeeded, outcome.attempted - 2);

    let source_conn = Connection::open(&source).unwrap();
    let target_conn = Connection::open(&target).unwrap();

    for table in ["categories", "products"] {
        assert_eq!(
            all_rows(&source_conn, table),
            all_rows(&target_conn, table),
            "row sets differ for table {}",
            table
        );
    }
}

#[tokio::test]
async fn test_round_trip_is_exact_without_embedded_terminators() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clean.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE products (id INTEGER PRIMARY KEY, name TEXT, price REAL, qty INTEGER);
         CREATE TABLE sales (id INTEGER PRIMARY KEY, receipt BLOB);
         INSERT INTO products (id, name, price, qty) VALUES
         (1, 'Shampoo', 10.5, 10),
         (2, 'O''Brien Oil', 5.0, 5),
         (3, 'Path C:\\share', NULL, 0);
         INSERT INTO sales (id, receipt) VALUES (1, X'00FF10');",
    )
    .unwrap();
    drop(conn);

    let report = commands::backup(&path, dir.path(), Arc::new(NoProgress), CancelToken::new())
        .await
        .unwrap();

    let target = dir.path().join("clean_restored.db");
    Connection::open(&target).unwrap();
    let outcome = commands::restore(
        &target,
        &report.path,
        true,
        Arc::new(NoProgress),
        CancelToken::new(),
    )
    .await
    .unwrap();
    assert!(outcome.is_clean(), "unexpected failures: {:?}", outcome.failed);

    let source_conn = Connection::open(&path).unwrap();
    let target_conn = Connection::open(&target).unwrap();
    for table in ["products", "sales"] {
        assert_eq!(all_rows(&source_conn, table), all_rows(&target_conn, table));
    }
}

#[tokio::test]
async fn test_real_values_survive_columns_without_affinity() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("readings.db");
    let conn = Connection::open(&path).unwrap();
    // SQLite allows columns with no declared type; such a column has no
    // numeric affinity, so a literal "3" would come back as an INTEGER
    conn.execute_batch(
        "CREATE TABLE readings (id INTEGER PRIMARY KEY, v);
         INSERT INTO readings (id, v) VALUES (1, 3.0), (2, 2.5);",
    )
    .unwrap();
    drop(conn);

    let report = commands::backup(&path, dir.path(), Arc::new(NoProgress), CancelToken::new())
        .await
        .unwrap();
    let dump = std::fs::read_to_string(&report.path).unwrap();
    assert!(dump.contains("(1, 3.0),"), "whole real lost its fraction:\n{}", dump);

    let target = dir.path().join("readings_restored.db");
    Connection::open(&target).unwrap();
    let outcome = commands::restore(
        &target,
        &report.path,
        true,
        Arc::new(NoProgress),
        CancelToken::new(),
    )
    .await
    .unwrap();
    assert!(outcome.is_clean());

    let source_conn = Connection::open(&path).unwrap();
    let target_conn = Connection::open(&target).unwrap();
    let restored = all_rows(&target_conn, "readings");
    assert_eq!(all_rows(&source_conn, "readings"), restored);
    assert_eq!(restored[0][1], Value::Real(3.0));
}

#[tokio::test]
async fn test_restore_continues_past_invalid_statement() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("target.db");
    Connection::open(&db).unwrap();

    let script = dir.path().join("broken.sql");
    std::fs::write(
        &script,
        "CREATE TABLE t (a INTEGER);\
         NOT EVEN SQL;\
         INSERT INTO t (a) VALUES (1);\
         INSERT INTO t (a) VALUES (2);\
         INSERT INTO t (a) VALUES (3);",
    )
    .unwrap();

    let outcome = commands::restore(&db, &script, true, Arc::new(NoProgress), CancelToken::new())
        .await
        .unwrap();

    assert_eq!(outcome.attempted, 5);
    assert_eq!(outcome.succeeded, 4);
    assert_eq!(outcome.failed_count(), 1);
    assert_eq!(outcome.failed[0].text, "NOT EVEN SQL");
    // The CLI turns failed_count() > 0 into a non-zero exit
    assert!(!outcome.is_clean());

    let conn = Connection::open(&db).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM t", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 3);
}

#[tokio::test]
async fn test_backup_progress_is_monotone_and_ends_at_100() {
    let dir = tempfile::tempdir().unwrap();
    let db = create_fixture_db(dir.path());

    let seen = Arc::new(Mutex::new(Vec::new()));
    let reporter: Arc<dyn ProgressReporter> = {
        let seen = seen.clone();
        Arc::new(move |p: u8| seen.lock().unwrap().push(p))
    };

    commands::backup(&db, dir.path(), reporter, CancelToken::new())
        .await
        .unwrap();

    let seen = seen.lock().unwrap();
    assert!(!seen.is_empty());
    assert!(seen.windows(2).all(|w| w[0] <= w[1]), "not monotone: {:?}", seen);
    assert_eq!(*seen.last().unwrap(), 100);
}

#[tokio::test]
async fn test_cancelled_backup_is_reported_as_stopped_early() {
    let dir = tempfile::tempdir().unwrap();
    let db = create_fixture_db(dir.path());

    let cancel = CancelToken::new();
    cancel.cancel();

    let report = commands::backup(&db, dir.path(), Arc::new(NoProgress), cancel)
        .await
        .unwrap();
    assert!(report.summary.cancelled);
    assert_eq!(report.summary.tables_dumped, 0);

    // The partial file is left on disk, header only
    let dump = std::fs::read_to_string(&report.path).unwrap();
    assert!(dump.starts_with("-- Database backup created on "));
    assert!(!dump.contains("CREATE TABLE"));
}

#[tokio::test]
async fn test_restore_of_empty_script_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("target.db");
    Connection::open(&db).unwrap();

    let script = dir.path().join("empty.sql");
    std::fs::write(&script, "-- nothing here\n\n").unwrap();

    let outcome = commands::restore(&db, &script, true, Arc::new(NoProgress), CancelToken::new())
        .await
        .unwrap();
    assert_eq!(outcome.attempted, 0);
    assert!(outcome.is_clean());
}

#[test]
fn test_dump_document_preserves_catalog_order() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE zebra (id INTEGER);
         CREATE TABLE apple (id INTEGER);
         CREATE TABLE mango (id INTEGER);",
    )
    .unwrap();

    let tables = snapshot::list_tables(&conn).unwrap();
    let mut out = Vec::new();
    snapshot::write_dump(
        &conn,
        "ordering",
        &tables,
        &mut out,
        &NoProgress,
        &CancelToken::new(),
    )
    .unwrap();
    let dump = String::from_utf8(out).unwrap();

    let apple = dump.find("-- Table structure for apple").unwrap();
    let mango = dump.find("-- Table structure for mango").unwrap();
    let zebra = dump.find("-- Table structure for zebra").unwrap();
    assert!(apple < mango && mango < zebra);
}
