// src/modules/mod.rs
//! Business modules. Each one is a [`ModuleDef`] over a single table:
//! the registration form, the searchable listing and the printable report
//! are all driven from that definition.

pub mod form;
pub mod inventory;
pub mod listing;
pub mod report;
pub mod search;

use serde::{Deserialize, Serialize};

use crate::gateway::PROFILES_TABLE;
use crate::models::user::Capability;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKind {
    Inventory,
    Quotes,
    Sales,
    Clients,
    Accounting,
    Settings,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 6] = [
        ModuleKind::Inventory,
        ModuleKind::Quotes,
        ModuleKind::Sales,
        ModuleKind::Clients,
        ModuleKind::Accounting,
        ModuleKind::Settings,
    ];

    pub fn def(self) -> &'static ModuleDef {
        match self {
            ModuleKind::Inventory => &INVENTORY,
            ModuleKind::Quotes => &QUOTES,
            ModuleKind::Sales => &SALES,
            ModuleKind::Clients => &CLIENTS,
            ModuleKind::Accounting => &ACCOUNTING,
            ModuleKind::Settings => &SETTINGS,
        }
    }

    /// Capability a role needs to see this module in its menu.
    pub fn required_capability(self) -> Option<Capability> {
        match self {
            ModuleKind::Settings => Some(Capability::ManageSettings),
            _ => None,
        }
    }
}

/// Every table the application reads or writes.
pub fn tables() -> Vec<&'static str> {
    ModuleKind::ALL
        .iter()
        .map(|kind| kind.def().table)
        .chain(std::iter::once(PROFILES_TABLE))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Plain,
    /// Marked-up sale price on creation, low-stock flags, stock valuation.
    Inventory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Money,
    Count,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldDef {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct ReportColumn {
    pub field: &'static str,
    pub header: &'static str,
    pub kind: FieldKind,
    pub placeholder: &'static str,
}

#[derive(Debug)]
pub struct ModuleDef {
    pub kind: ModuleKind,
    pub label: &'static str,
    pub title: &'static str,
    pub table: &'static str,
    pub fields: &'static [FieldDef],
    pub searchable: &'static [&'static str],
    pub report: &'static [ReportColumn],
    pub behavior: Behavior,
}

const fn field(name: &'static str, label: &'static str, kind: FieldKind, required: bool) -> FieldDef {
    FieldDef { name, label, kind, required }
}

const fn column(
    field: &'static str,
    header: &'static str,
    kind: FieldKind,
    placeholder: &'static str,
) -> ReportColumn {
    ReportColumn { field, header, kind, placeholder }
}

use FieldKind::{Count, Money, Text};

static INVENTORY: ModuleDef = ModuleDef {
    kind: ModuleKind::Inventory,
    label: "Inventario",
    title: "REPORTE DE INVENTARIO",
    table: "productos",
    fields: &[
        field("nombre", "Nombre del Producto", Text, true),
        field("barcode", "Código de Barras", Text, false),
        field("referencia", "Número de Referencia", Text, false),
        field("precio_costo", "Costo de Compra ($)", Money, true),
        field("stock", "Stock Inicial", Count, false),
        field("stock_minimo", "Stock Mínimo", Count, false),
    ],
    searchable: &["nombre", "barcode", "referencia"],
    report: &[
        column("barcode", "Barcode", Text, "S/B"),
        column("referencia", "Ref.", Text, "S/R"),
        column("nombre", "Producto", Text, "N/A"),
        column("stock", "Stock", Count, ""),
        column("precio_venta", "Precio", Money, ""),
    ],
    behavior: Behavior::Inventory,
};

static QUOTES: ModuleDef = ModuleDef {
    kind: ModuleKind::Quotes,
    label: "Cotizaciones",
    title: "REPORTE DE COTIZACIONES",
    table: "cotizaciones",
    fields: &[
        field("cliente", "Cliente", Text, true),
        field("descripcion", "Descripción", Text, false),
        field("monto", "Monto ($)", Money, true),
    ],
    searchable: &["cliente", "descripcion"],
    report: &[
        column("cliente", "Cliente", Text, "N/A"),
        column("descripcion", "Descripción", Text, ""),
        column("monto", "Monto", Money, ""),
    ],
    behavior: Behavior::Plain,
};

static SALES: ModuleDef = ModuleDef {
    kind: ModuleKind::Sales,
    label: "Ventas",
    title: "REPORTE DE VENTAS",
    table: "ventas",
    fields: &[
        field("cliente", "Cliente", Text, true),
        field("producto", "Producto", Text, false),
        field("cantidad", "Cantidad", Count, false),
        field("total", "Total ($)", Money, true),
    ],
    searchable: &["cliente", "producto"],
    report: &[
        column("cliente", "Cliente", Text, "N/A"),
        column("producto", "Producto", Text, "N/A"),
        column("cantidad", "Cantidad", Count, ""),
        column("total", "Total", Money, ""),
    ],
    behavior: Behavior::Plain,
};

static CLIENTS: ModuleDef = ModuleDef {
    kind: ModuleKind::Clients,
    label: "Clientes",
    title: "REPORTE DE CLIENTES",
    table: "clientes",
    fields: &[
        field("nombre", "Nombre", Text, true),
        field("ruc", "RUC", Text, false),
        field("telefono", "Teléfono", Text, false),
        field("email", "Correo", Text, false),
    ],
    searchable: &["nombre", "ruc", "email"],
    report: &[
        column("nombre", "Cliente", Text, "N/A"),
        column("ruc", "RUC", Text, "S/R"),
        column("telefono", "Teléfono", Text, ""),
        column("email", "Correo", Text, ""),
    ],
    behavior: Behavior::Plain,
};

static ACCOUNTING: ModuleDef = ModuleDef {
    kind: ModuleKind::Accounting,
    label: "Contabilidad",
    title: "REPORTE CONTABLE",
    table: "contabilidad",
    fields: &[
        field("concepto", "Concepto", Text, true),
        field("tipo", "Tipo", Text, false),
        field("monto", "Monto ($)", Money, true),
    ],
    searchable: &["concepto", "tipo"],
    report: &[
        column("concepto", "Concepto", Text, "N/A"),
        column("tipo", "Tipo", Text, ""),
        column("monto", "Monto", Money, ""),
    ],
    behavior: Behavior::Plain,
};

static SETTINGS: ModuleDef = ModuleDef {
    kind: ModuleKind::Settings,
    label: "Configuración",
    title: "REPORTE DE CONFIGURACIÓN",
    table: "configuracion",
    fields: &[
        field("clave", "Parámetro", Text, true),
        field("valor", "Valor", Text, false),
    ],
    searchable: &["clave", "valor"],
    report: &[
        column("clave", "Parámetro", Text, "N/A"),
        column("valor", "Valor", Text, ""),
    ],
    behavior: Behavior::Plain,
};
