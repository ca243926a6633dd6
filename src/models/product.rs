use serde::Serialize;

use crate::models::row::{self, Row};

/// Fixed cost-to-sale markup applied when a product is registered.
pub const MARKUP: f64 = 1.10;

/// A row of the `productos` table.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: Option<i64>,
    pub nombre: String,
    pub barcode: String,
    pub referencia: String,
    pub precio_costo: f64,
    pub precio_venta: f64,
    pub stock: i64,
    pub stock_minimo: i64,
}

impl Product {
    pub fn from_row(row: &Row) -> Self {
        Self {
            id: row::id(row),
            nombre: row::text(row, "nombre"),
            barcode: row::text(row, "barcode"),
            referencia: row::text(row, "referencia"),
            precio_costo: row::number(row, "precio_costo"),
            precio_venta: row::number(row, "precio_venta"),
            stock: row::count(row, "stock"),
            stock_minimo: row::count(row, "stock_minimo"),
        }
    }

    pub fn is_low_stock(&self) -> bool {
        is_low_stock(self.stock, self.stock_minimo)
    }

    pub fn subtotal(&self) -> f64 {
        self.stock as f64 * self.precio_venta
    }
}

/// Sale price for a purchase cost, rounded to cents.
pub fn sale_price(cost: f64) -> f64 {
    round_cents(cost * MARKUP)
}

pub fn is_low_stock(stock: i64, minimum: i64) -> bool {
    stock <= minimum
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn markup_is_ten_percent_to_the_cent() {
        assert_eq!(sale_price(2.00), 2.20);
        assert_eq!(sale_price(10.0), 11.0);
        assert_eq!(sale_price(0.01), 0.01);
        assert_eq!(sale_price(3.33), 3.66);
        for cents in 1..2000 {
            let cost = cents as f64 / 100.0;
            let expected = (cost * 1.10 * 100.0).round() / 100.0;
            assert_eq!(sale_price(cost), expected);
        }
    }

    #[test]
    fn low_stock_is_inclusive() {
        assert!(is_low_stock(10, 10));
        assert!(is_low_stock(0, 0));
        assert!(is_low_stock(3, 10));
        assert!(!is_low_stock(11, 10));
    }

    #[test]
    fn reads_product_rows() {
        let row = json!({
            "id": 1, "nombre": "Tornillo 1/4", "barcode": "750", "referencia": null,
            "precio_costo": 2.0, "precio_venta": 2.2, "stock": 100, "stock_minimo": 10
        });
        let product = Product::from_row(row.as_object().unwrap());
        assert_eq!(product.referencia, "");
        assert!(!product.is_low_stock());
        assert!((product.subtotal() - 220.0).abs() < 1e-9);
    }
}
