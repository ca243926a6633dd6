// src/modules/listing.rs
use super::{inventory, search, Behavior, ModuleDef};
use crate::dtos::module::{Card, ListingView};
use crate::models::notice::Notices;
use crate::models::product::Product;
use crate::models::row::{self, Row};

/// Builds the searchable card listing of a module from one fetch.
pub fn build(def: &'static ModuleDef, rows: Vec<Row>, query: &str, mut notices: Notices) -> ListingView {
    let total = rows.len();
    let is_inventory = def.behavior == Behavior::Inventory;

    let low_stock_count = is_inventory.then(|| {
        let products: Vec<Product> = rows.iter().map(Product::from_row).collect();
        inventory::summarize(&products).low_stock_count
    });
    if let Some(banner) = low_stock_count.and_then(inventory::low_stock_banner) {
        notices.warning(banner);
    }

    let cards = search::filter(rows, def.searchable, query)
        .into_iter()
        .map(|fields| Card {
            id: row::id(&fields),
            low_stock: is_inventory.then(|| Product::from_row(&fields).is_low_stock()),
            fields,
        })
        .collect();

    ListingView {
        module: def.kind,
        title: def.label,
        form: def.fields,
        query: query.to_string(),
        total,
        cards,
        low_stock_count,
        notices,
    }
}
