// src/modules/report.rs
use axum::response::{Html, IntoResponse, Response};
use handlebars::Handlebars;
use serde::Serialize;

use super::{inventory, Behavior, FieldKind, ModuleDef};
use crate::models::product::Product;
use crate::models::row::{self, Row};

const TEMPLATE_NAME: &str = "report";

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{{company}} - {{title}}</title></head>
<body>
<div style="font-family: Arial, sans-serif; padding: 20px;">
    <h2 style="text-align: center; color: #004A99; border-bottom: 2px solid #004A99;">{{company}} - {{title}}</h2>
    <p style="text-align: center;">Fecha: {{generated_at}}</p>
    <table style="width: 100%; border-collapse: collapse; margin-top: 10px;">
        <thead style="background: #f2f2f2;">
            <tr>{{#each headers}}<th style="border: 1px solid #ddd; padding: 8px;">{{this}}</th>{{/each}}</tr>
        </thead>
        <tbody>
{{#each rows}}            <tr>{{#each cells}}<td style="border: 1px solid #ddd; padding: 8px; text-align: {{align}};{{#if highlight}} color: #C00000; font-weight: bold;{{/if}}">{{text}}</td>{{/each}}</tr>
{{/each}}        </tbody>
{{#if footer}}        <tfoot>
            <tr><td colspan="{{footer.label_span}}" style="border: 1px solid #ddd; padding: 8px; text-align: right; font-weight: bold;">Total inventario</td><td style="border: 1px solid #ddd; padding: 8px; text-align: right; font-weight: bold;">{{footer.grand_total}}</td></tr>
            <tr><td colspan="{{footer.label_span}}" style="border: 1px solid #ddd; padding: 8px; text-align: right;">Productos bajo mínimo</td><td style="border: 1px solid #ddd; padding: 8px; text-align: right;">{{footer.low_stock_count}}</td></tr>
        </tfoot>
{{/if}}    </table>
</div>
<script>window.print();</script>
</body>
</html>
"#;

/// Renders report documents. Built once at startup and shared.
pub struct ReportRenderer {
    registry: Handlebars<'static>,
}

impl ReportRenderer {
    pub fn new() -> Result<Self, handlebars::TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_template_string(TEMPLATE_NAME, TEMPLATE)?;
        Ok(Self { registry })
    }

    pub fn render(&self, document: &ReportDocument) -> Result<ReportPayload, handlebars::RenderError> {
        self.registry
            .render(TEMPLATE_NAME, document)
            .map(ReportPayload)
    }
}

/// A rendered print document. Handed straight to the response that
/// requested it and consumed there.
#[derive(Debug)]
pub struct ReportPayload(String);

impl ReportPayload {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl IntoResponse for ReportPayload {
    fn into_response(self) -> Response {
        Html(self.0).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct ReportDocument {
    pub company: String,
    pub title: &'static str,
    pub generated_at: String,
    pub headers: Vec<&'static str>,
    pub rows: Vec<ReportRow>,
    pub footer: Option<ReportFooter>,
}

#[derive(Debug, Serialize)]
pub struct ReportRow {
    pub cells: Vec<ReportCell>,
}

#[derive(Debug, Serialize)]
pub struct ReportCell {
    pub text: String,
    pub align: &'static str,
    pub highlight: bool,
}

#[derive(Debug, Serialize)]
pub struct ReportFooter {
    pub label_span: usize,
    pub grand_total: String,
    pub low_stock_count: usize,
}

/// Lays out one snapshot of rows as a report. Totals are computed from
/// the same rows that are listed.
pub fn build(def: &ModuleDef, rows: &[Row], company: &str, generated_at: String) -> ReportDocument {
    let mut headers: Vec<&'static str> = def.report.iter().map(|c| c.header).collect();
    let is_inventory = def.behavior == Behavior::Inventory;
    if is_inventory {
        headers.push("Subtotal");
    }

    let mut products = Vec::new();
    let body = rows
        .iter()
        .map(|r| {
            let product = is_inventory.then(|| Product::from_row(r));
            let low = product.as_ref().is_some_and(Product::is_low_stock);
            let mut cells: Vec<ReportCell> = def
                .report
                .iter()
                .map(|column| ReportCell {
                    text: match column.kind {
                        FieldKind::Text => row::text_or(r, column.field, column.placeholder),
                        FieldKind::Count => row::count(r, column.field).to_string(),
                        FieldKind::Money => format_money(row::number(r, column.field)),
                    },
                    align: match column.kind {
                        FieldKind::Text => "left",
                        FieldKind::Count => "center",
                        FieldKind::Money => "right",
                    },
                    highlight: low && column.field == "stock",
                })
                .collect();
            if let Some(product) = product {
                cells.push(ReportCell {
                    text: format_money(product.subtotal()),
                    align: "right",
                    highlight: false,
                });
                products.push(product);
            }
            ReportRow { cells }
        })
        .collect();

    let footer = is_inventory.then(|| {
        let summary = inventory::summarize(&products);
        ReportFooter {
            label_span: headers.len() - 1,
            grand_total: format_money(summary.grand_total),
            low_stock_count: summary.low_stock_count,
        }
    });

    ReportDocument {
        company: company.to_string(),
        title: def.title,
        generated_at,
        headers,
        rows: body,
        footer,
    }
}

/// `$1,234.56`
pub fn format_money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::ModuleKind;
    use serde_json::{json, Value};

    fn rows(values: Vec<Value>) -> Vec<Row> {
        values.into_iter().map(|v| v.as_object().cloned().unwrap()).collect()
    }

    fn inventory_rows() -> Vec<Row> {
        rows(vec![
            json!({ "nombre": "Tornillo 1/4", "barcode": "7501", "referencia": "CIR-10",
                    "stock": 100, "stock_minimo": 10, "precio_venta": 2.2 }),
            json!({ "nombre": "Cemento <Gris>", "barcode": "", "stock": 4, "stock_minimo": 5,
                    "precio_venta": 1250.0 }),
        ])
    }

    #[test]
    fn money_formatting() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(2.2), "$2.20");
        assert_eq!(format_money(1234.5), "$1,234.50");
        assert_eq!(format_money(1234567.891), "$1,234,567.89");
        assert_eq!(format_money(-12.5), "-$12.50");
    }

    #[test]
    fn inventory_report_totals_match_rows() {
        let doc = build(ModuleKind::Inventory.def(), &inventory_rows(), "CIR PANAMÁ", "01/02/2026 10:00".into());
        assert_eq!(doc.headers, vec!["Barcode", "Ref.", "Producto", "Stock", "Precio", "Subtotal"]);
        assert_eq!(doc.rows.len(), 2);

        let footer = doc.footer.as_ref().unwrap();
        assert_eq!(footer.grand_total, "$5,220.00");
        assert_eq!(footer.low_stock_count, 1);
        assert_eq!(footer.label_span, 5);

        let second = &doc.rows[1].cells;
        assert_eq!(second[0].text, "S/B");
        assert_eq!(second[1].text, "S/R");
        assert!(second[3].highlight);
        assert!(!doc.rows[0].cells[3].highlight);
        assert_eq!(second[5].text, "$5,000.00");
    }

    #[test]
    fn plain_report_has_no_footer() {
        let data = rows(vec![json!({ "nombre": "Constructora Istmo", "ruc": "155-1" })]);
        let doc = build(ModuleKind::Clients.def(), &data, "CIR PANAMÁ", String::new());
        assert!(doc.footer.is_none());
        assert_eq!(doc.headers.len(), 4);
        assert_eq!(doc.rows[0].cells[2].text, "");
    }

    #[test]
    fn renders_escaped_printable_html() {
        let renderer = ReportRenderer::new().unwrap();
        let doc = build(ModuleKind::Inventory.def(), &inventory_rows(), "CIR PANAMÁ", "01/02/2026 10:00".into());
        let payload = renderer.render(&doc).unwrap();
        let html = payload.as_str();

        assert!(html.contains("CIR PANAMÁ - REPORTE DE INVENTARIO"));
        assert!(html.contains("Fecha: 01/02/2026 10:00"));
        assert!(html.contains("Tornillo 1/4"));
        assert!(html.contains("Cemento &lt;Gris&gt;"));
        assert!(!html.contains("<Gris>"));
        assert!(html.contains("$5,220.00"));
        assert!(html.trim_end().ends_with("</html>"));
        assert!(html.contains("<script>window.print();</script>"));
    }
}
