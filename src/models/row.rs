// src/models/row.rs
use serde_json::{Map, Value};

/// A table row as exchanged with the backing store: column name to JSON value.
pub type Row = Map<String, Value>;

/// Reads a column as display text. Missing and null columns read as "".
pub fn text(row: &Row, key: &str) -> String {
    match row.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Reads a column as text, falling back to `placeholder` when empty.
pub fn text_or(row: &Row, key: &str, placeholder: &str) -> String {
    let value = text(row, key);
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value
    }
}

// Numeric columns may come back as numbers or as numeric strings
// (PostgreSQL NUMERIC through to_jsonb, hand-edited rows); anything
// unreadable counts as zero.
pub fn number(row: &Row, key: &str) -> f64 {
    match row.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

pub fn count(row: &Row, key: &str) -> i64 {
    match row.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .or_else(|_| s.trim().parse::<f64>().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        _ => 0,
    }
}

pub fn id(row: &Row) -> Option<i64> {
    row.get("id").and_then(Value::as_i64)
}
