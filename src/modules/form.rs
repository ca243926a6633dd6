// src/modules/form.rs
use serde_json::Value;
use thiserror::Error;

use super::{inventory, Behavior, FieldDef, FieldKind, ModuleDef};
use crate::models::product::round_cents;
use crate::models::row::Row;

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("{} required", missing_list(.0))]
    Missing(Vec<&'static str>),

    #[error("{field}: {reason}")]
    Invalid { field: &'static str, reason: &'static str },

    #[error("Nothing to update")]
    Empty,
}

fn missing_list(labels: &[&str]) -> String {
    match labels {
        [one] => format!("{one} is"),
        many => format!("{} are", many.join(", ")),
    }
}

/// Validates a registration form and builds the row to insert,
/// including derived columns.
pub fn validate_new(def: &ModuleDef, input: &Row) -> Result<Row, FormError> {
    let mut row = Row::new();
    let mut missing = Vec::new();

    for field in def.fields {
        match parse(field, input.get(field.name))? {
            Some(value) => {
                row.insert(field.name.to_string(), value);
            }
            None if field.required => missing.push(field.label),
            None => {
                row.insert(field.name.to_string(), default_value(field.kind));
            }
        }
    }

    if !missing.is_empty() {
        return Err(FormError::Missing(missing));
    }

    if def.behavior == Behavior::Inventory {
        inventory::apply_markup(&mut row, input);
    }
    Ok(row)
}

/// Validates an edit. Only declared fields that are present are kept,
/// and derived columns are left as stored.
pub fn validate_edit(def: &ModuleDef, input: &Row) -> Result<Row, FormError> {
    let mut row = Row::new();
    for field in def.fields {
        if !input.contains_key(field.name) {
            continue;
        }
        match parse(field, input.get(field.name))? {
            Some(value) => {
                row.insert(field.name.to_string(), value);
            }
            None if field.required => return Err(FormError::Missing(vec![field.label])),
            None => {
                row.insert(field.name.to_string(), default_value(field.kind));
            }
        }
    }
    if row.is_empty() {
        return Err(FormError::Empty);
    }
    Ok(row)
}

fn default_value(kind: FieldKind) -> Value {
    match kind {
        FieldKind::Text => Value::from(""),
        FieldKind::Money => Value::from(0.0),
        FieldKind::Count => Value::from(0),
    }
}

// `None` means "not provided"; for a required money field an amount that
// rounds to zero cents counts as not provided.
fn parse(field: &FieldDef, value: Option<&Value>) -> Result<Option<Value>, FormError> {
    let value = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(v) => v,
    };
    let invalid = |reason| FormError::Invalid { field: field.label, reason };

    match field.kind {
        FieldKind::Text => {
            let text = match value {
                Value::String(s) => s.trim().to_string(),
                Value::Number(n) => n.to_string(),
                _ => return Err(invalid("must be text")),
            };
            Ok((!text.is_empty()).then(|| Value::from(text)))
        }
        FieldKind::Money => {
            let amount = match value {
                Value::Number(n) => n.as_f64(),
                Value::String(s) if s.trim().is_empty() => return Ok(None),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            }
            .filter(|a| a.is_finite())
            .ok_or_else(|| invalid("must be an amount"))?;
            if amount < 0.0 {
                return Err(invalid("must not be negative"));
            }
            let amount = round_cents(amount);
            if field.required && amount == 0.0 {
                return Ok(None);
            }
            Ok(Some(Value::from(amount)))
        }
        FieldKind::Count => {
            let count = match value {
                Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole_number)),
                Value::String(s) if s.trim().is_empty() => return Ok(None),
                Value::String(s) => {
                    let s = s.trim();
                    s.parse::<i64>()
                        .ok()
                        .or_else(|| s.parse::<f64>().ok().and_then(whole_number))
                }
                _ => None,
            }
            .ok_or_else(|| invalid("must be a whole number"))?;
            if count < 0 {
                return Err(invalid("must not be negative"));
            }
            Ok(Some(Value::from(count)))
        }
    }
}

// `i64::MAX as f64` is 2^63, which is already out of range.
fn whole_number(f: f64) -> Option<i64> {
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.is_finite() && f.fract() == 0.0 && in_range).then(|| f as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::ModuleKind;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn registers_product_with_markup() {
        let input = row(json!({
            "nombre": "  Tornillo 1/4 ", "precio_costo": 2.0, "stock": 100, "stock_minimo": 10,
            "precio_venta": 99.0, "unknown": "dropped"
        }));
        let out = validate_new(ModuleKind::Inventory.def(), &input).unwrap();
        assert_eq!(out["nombre"], json!("Tornillo 1/4"));
        assert_eq!(out["barcode"], json!(""));
        assert_eq!(out["referencia"], json!(""));
        assert_eq!(out["precio_venta"], json!(2.2));
        assert_eq!(out["stock"], json!(100));
        assert!(!out.contains_key("unknown"));
    }

    #[test]
    fn name_and_cost_are_required() {
        let def = ModuleKind::Inventory.def();
        let err = validate_new(def, &row(json!({ "nombre": "", "precio_costo": 0 }))).unwrap_err();
        assert_eq!(
            err,
            FormError::Missing(vec!["Nombre del Producto", "Costo de Compra ($)"])
        );
        assert_eq!(
            err.to_string(),
            "Nombre del Producto, Costo de Compra ($) are required"
        );

        let err = validate_new(def, &row(json!({ "nombre": "x" }))).unwrap_err();
        assert_eq!(err.to_string(), "Costo de Compra ($) is required");
    }

    #[test]
    fn rejects_bad_numbers() {
        let def = ModuleKind::Inventory.def();
        let negative_stock = row(json!({ "nombre": "x", "precio_costo": 1, "stock": -1 }));
        assert!(matches!(
            validate_new(def, &negative_stock),
            Err(FormError::Invalid { field: "Stock Inicial", .. })
        ));
        let fractional = row(json!({ "nombre": "x", "precio_costo": 1, "stock_minimo": 1.5 }));
        assert!(validate_new(def, &fractional).is_err());
        let words = row(json!({ "nombre": "x", "precio_costo": "cheap" }));
        assert!(validate_new(def, &words).is_err());
        let negative_cost = row(json!({ "nombre": "x", "precio_costo": -3 }));
        assert!(validate_new(def, &negative_cost).is_err());
    }

    #[test]
    fn accepts_numeric_strings() {
        let def = ModuleKind::Inventory.def();
        let input = row(json!({ "nombre": "x", "precio_costo": "10", "stock": "4" }));
        let out = validate_new(def, &input).unwrap();
        assert_eq!(out["precio_costo"], json!(10.0));
        assert_eq!(out["precio_venta"], json!(11.0));
        assert_eq!(out["stock"], json!(4));
    }

    #[test]
    fn stored_price_matches_preview_for_sub_cent_costs() {
        let def = ModuleKind::Inventory.def();
        for cost in [1.005, 2.675, 0.015, 10.0049, 3.333] {
            let input = row(json!({ "nombre": "x", "precio_costo": cost }));
            let out = validate_new(def, &input).unwrap();
            let preview = inventory::preview(&input);
            assert_eq!(out["precio_venta"], preview["precio_venta"], "cost {cost}");
            assert_eq!(out["precio_venta"], json!(round_cents(cost * 1.10)), "cost {cost}");
            assert!(out["precio_costo"].as_f64().unwrap() > 0.0);
        }
        let out = validate_new(def, &row(json!({ "nombre": "x", "precio_costo": 1.005 }))).unwrap();
        assert_eq!(out["precio_venta"], json!(1.11));
    }

    #[test]
    fn cost_rounding_to_zero_is_missing() {
        let def = ModuleKind::Inventory.def();
        for cost in [json!(0.004), json!("0.001")] {
            let input = row(json!({ "nombre": "x", "precio_costo": cost }));
            assert_eq!(
                validate_new(def, &input),
                Err(FormError::Missing(vec!["Costo de Compra ($)"]))
            );
            assert!(inventory::preview(&input).is_empty());
        }
    }

    #[test]
    fn counts_parse_alike_from_numbers_and_strings() {
        let def = ModuleKind::Inventory.def();
        for stock in [json!(7), json!(7.0), json!("7"), json!("7.0")] {
            let input = row(json!({ "nombre": "x", "precio_costo": 1, "stock": stock }));
            assert_eq!(validate_new(def, &input).unwrap()["stock"], json!(7));
        }
        for stock in [json!(1e20), json!("1e20"), json!("7.5"), json!(9.3e18)] {
            let input = row(json!({ "nombre": "x", "precio_costo": 1, "stock": stock }));
            assert!(matches!(
                validate_new(def, &input),
                Err(FormError::Invalid { field: "Stock Inicial", .. })
            ));
        }
    }

    #[test]
    fn plain_modules_have_no_derived_columns() {
        let def = ModuleKind::Clients.def();
        let out = validate_new(def, &row(json!({ "nombre": "Constructora Istmo" }))).unwrap();
        assert_eq!(out.len(), 4);
        assert!(!out.contains_key("precio_venta"));
    }

    #[test]
    fn edits_are_partial_and_never_reprice() {
        let def = ModuleKind::Inventory.def();
        let out = validate_edit(def, &row(json!({ "precio_costo": 5, "precio_venta": 1 }))).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out["precio_costo"], json!(5.0));

        assert_eq!(
            validate_edit(def, &row(json!({ "nombre": " " }))),
            Err(FormError::Missing(vec!["Nombre del Producto"]))
        );
        assert_eq!(validate_edit(def, &row(json!({ "id": 3 }))), Err(FormError::Empty));
    }
}
