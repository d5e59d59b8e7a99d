// ABOUTME: Value encoder for embedding typed scalars in generated statements
// ABOUTME: Produces SQLite literal syntax for NULL, numbers, text, and blobs

use rusqlite::types::Value;
use std::fmt::Write;

/// Encode a typed scalar as a literal suitable for a generated statement.
///
/// Pure function, total over every value rusqlite can hand back from a row:
///
/// - `NULL` → the text `NULL`
/// - integers and reals → their canonical textual form, unquoted
/// - text → wrapped in single quotes, with any single quote inside doubled
///   (`''`). Backslashes carry no meaning in SQLite literals and pass
///   through untouched, so text round-trips exactly.
/// - blobs → hex literals (`X'...'`)
pub fn encode_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => encode_real(*f),
        Value::Text(s) => format!("'{}'", s.replace('\'', "''")),
        Value::Blob(bytes) => {
            let mut literal = String::with_capacity(bytes.len() * 2 + 3);
            literal.push_str("X'");
            for b in bytes {
                // infallible: writing to a String cannot fail
                let _ = write!(literal, "{:02X}", b);
            }
            literal.push('\'');
            literal
        }
    }
}

fn encode_real(f: f64) -> String {
    // SQLite stores infinities but {:?} would print "inf"; 1e999 overflows to
    // infinity when parsed back, which is how the sqlite3 shell dumps it too.
    // NaN is never read back from storage (SQLite stores it as NULL).
    if f == f64::INFINITY {
        "1e999".to_string()
    } else if f == f64::NEG_INFINITY {
        "-1e999".to_string()
    } else {
        // {:?} keeps the fractional part (3.0, not 3), so a real replayed
        // into a column without numeric affinity stays a real
        format!("{:?}", f)
    }
}
