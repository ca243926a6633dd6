// src/modules/search.rs
use crate::models::row::{self, Row};

/// Case-insensitive substring match of `query` against any of `fields`.
/// An empty query matches every row.
pub fn matches(row: &Row, fields: &[&str], query: &str) -> bool {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .any(|field| row::text(row, field).to_lowercase().contains(&needle))
}

pub fn filter(rows: Vec<Row>, fields: &[&str], query: &str) -> Vec<Row> {
    rows.into_iter().filter(|r| matches(r, fields, query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    const FIELDS: &[&str] = &["nombre", "barcode", "referencia"];

    fn rows() -> Vec<Row> {
        [
            json!({ "nombre": "Tornillo 1/4", "barcode": "7501", "referencia": "CIR-10" }),
            json!({ "nombre": "Cemento Gris", "barcode": null, "referencia": "cir-22" }),
            json!({ "nombre": "Clavo", "barcode": 8802 }),
        ]
        .into_iter()
        .map(|v: Value| v.as_object().cloned().unwrap())
        .collect()
    }

    #[test]
    fn empty_query_returns_everything() {
        assert_eq!(filter(rows(), FIELDS, "").len(), 3);
    }

    #[test]
    fn case_insensitive_on_every_field() {
        assert_eq!(filter(rows(), FIELDS, "TORNI").len(), 1);
        assert_eq!(filter(rows(), FIELDS, "torni").len(), 1);
        assert_eq!(filter(rows(), FIELDS, "CIR-").len(), 2);
        assert_eq!(filter(rows(), FIELDS, "880").len(), 1);
        assert_eq!(filter(rows(), FIELDS, "7501").len(), 1);
    }

    #[test]
    fn only_declared_fields_are_searched() {
        assert_eq!(filter(rows(), &["nombre"], "cir").len(), 0);
        assert!(filter(rows(), FIELDS, "none").is_empty());
    }
}
