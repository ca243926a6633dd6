// src/dtos/module.rs
use serde::{Deserialize, Serialize};

use crate::models::notice::Notices;
use crate::models::row::Row;
use crate::modules::{FieldDef, ModuleKind};

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// One card of a module listing.
#[derive(Debug, Serialize)]
pub struct Card {
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_stock: Option<bool>,
    pub fields: Row,
}

#[derive(Debug, Serialize)]
pub struct ListingView {
    pub module: ModuleKind,
    pub title: &'static str,
    pub form: &'static [FieldDef],
    pub query: String,
    pub total: usize,
    pub cards: Vec<Card>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_stock_count: Option<usize>,
    pub notices: Notices,
}

#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub module: ModuleKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<Row>,
    pub notices: Notices,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub module: ModuleKind,
    pub derived: Row,
}
