// src/modules/inventory.rs
use serde::Serialize;
use serde_json::Value;

use crate::models::product::{round_cents, sale_price, Product};
use crate::models::row::{self, Row};

/// Sale price for the cost as typed, or `None` while that cost is zero
/// once rounded to cents. The markup applies to the typed amount, not
/// to the stored (rounded) cost.
pub fn quote(input: &Row) -> Option<f64> {
    let cost = row::number(input, "precio_costo");
    (cost.is_finite() && round_cents(cost) > 0.0).then(|| sale_price(cost))
}

/// Sets `precio_venta` on a validated registration row. Only called on
/// registration.
pub fn apply_markup(row: &mut Row, input: &Row) {
    let price = quote(input).unwrap_or(0.0);
    row.insert("precio_venta".into(), Value::from(price));
}

/// Live price shown while the registration form is being filled in.
pub fn preview(input: &Row) -> Row {
    let mut out = Row::new();
    if let Some(price) = quote(input) {
        out.insert("precio_venta".into(), Value::from(price));
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StockSummary {
    pub products: usize,
    pub low_stock_count: usize,
    pub grand_total: f64,
}

/// Low-stock count and stock valuation over one snapshot of products.
pub fn summarize(products: &[Product]) -> StockSummary {
    let low_stock_count = products.iter().filter(|p| p.is_low_stock()).count();
    let grand_total = products.iter().map(Product::subtotal).sum::<f64>();
    StockSummary {
        products: products.len(),
        low_stock_count,
        grand_total: round_cents(grand_total),
    }
}

pub fn low_stock_banner(count: usize) -> Option<String> {
    match count {
        0 => None,
        1 => Some("1 product below minimum stock".to_string()),
        n => Some(format!("{n} products below minimum stock")),
    }
}
