//! Per-line detail rows and their CSV export.

use std::fs;
use std::path::Path;

use serde::Serialize;

use subtrack_catalog::Catalog;
use subtrack_core::{Money, format_delivery_date};
use subtrack_pricing::Order;

use super::ExportError;

pub const DETAIL_HEADER: [&str; 13] = [
    "School",
    "SchoolCode",
    "DeliveryDate",
    "Store",
    "ItemCode",
    "ItemLabel",
    "Qty",
    "UnitPrice",
    "LineTotal",
    "Subtotal",
    "Total",
    "SchoolContact",
    "SchoolEmail",
];

/// One spreadsheet row per line item.
///
/// School, store and order totals repeat on every row so each row stands on
/// its own in a spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DetailRow {
    pub school: String,
    pub school_code: String,
    pub delivery_date: String,
    pub store: String,
    pub item_code: String,
    pub item_label: String,
    pub qty: u32,
    pub unit_price: Money,
    pub line_total: Money,
    pub subtotal: Money,
    pub total: Money,
    pub school_contact: String,
    pub school_email: String,
}

pub fn detail_rows(catalog: &Catalog, order: &Order) -> Vec<DetailRow> {
    let school = catalog.school(order.school_name());
    let school_code = catalog.school_code(order.school_name()).to_string();
    let delivery_date = format_delivery_date(order.event_date());
    let store = catalog
        .store(order.store_key())
        .map(|s| s.name.clone())
        .unwrap_or_else(|_| order.store_key().to_string());
    let subtotal = order.subtotal();
    let total = order.total();

    order
        .items()
        .iter()
        .map(|line| DetailRow {
            school: order.school_name().to_string(),
            school_code: school_code.clone(),
            delivery_date: delivery_date.clone(),
            store: store.clone(),
            item_code: line.name().to_string(),
            item_label: catalog
                .menu_item(line.name())
                .map(|item| item.label.clone())
                .unwrap_or_else(|_| line.name().to_string()),
            qty: line.quantity(),
            unit_price: line.unit_price(),
            line_total: line.line_total(),
            subtotal,
            total,
            school_contact: school.contact_name.clone(),
            school_email: school.contact_email.clone(),
        })
        .collect()
}

/// Write rows (header always included) to `path`, replacing any old file.
pub fn write_detail_csv(path: &Path, rows: &[DetailRow]) -> Result<(), ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(DETAIL_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
