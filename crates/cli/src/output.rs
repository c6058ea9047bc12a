//! Plain console tables for the CLI.

use std::io::{self, Write};

use serde::Serialize;

use subtrack_catalog::Catalog;
use subtrack_invoicing::{ListedInvoice, MonthlyTotal};
use subtrack_pricing::Order;

pub fn json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

pub fn menu(out: &mut impl Write, catalog: &Catalog) -> io::Result<()> {
    writeln!(out, "Menu")?;
    for item in catalog.items() {
        writeln!(out, "  {:<6} {:<28} {:>8}", item.code, item.label, format!("${}", item.unit_price))?;
    }

    writeln!(out, "\nStores")?;
    for store in catalog.stores() {
        writeln!(out, "  {:<6} {}", store.key, store.name)?;
    }

    writeln!(out, "\nSchools")?;
    for school in catalog.schools() {
        let window = school.delivery_time_only();
        writeln!(out, "  {:<8} {:<28} {}", school.code, school.name, window)?;
    }
    Ok(())
}

pub fn quote(
    out: &mut impl Write,
    catalog: &Catalog,
    order: &Order,
    invoice_number: &str,
) -> io::Result<()> {
    writeln!(out, "Invoice #: {invoice_number}")?;
    for line in order.items() {
        let label = catalog
            .menu_item(line.name())
            .map(|item| item.label.as_str())
            .unwrap_or(line.name());
        writeln!(
            out,
            "  {:>4} x {:<28} {:>8} {:>9}",
            line.quantity(),
            label,
            format!("${}", line.unit_price()),
            format!("${}", line.line_total()),
        )?;
    }
    writeln!(out, "  {:<44} {:>9}", "Subtotal", format!("${}", order.subtotal()))?;
    writeln!(out, "  {:<44} {:>9}", "Delivery", format!("${}", order.delivery_fee()))?;
    writeln!(out, "  {:<44} {:>9}", "Total", format!("${}", order.total()))?;
    Ok(())
}

pub fn invoice_list(out: &mut impl Write, listed: &[ListedInvoice]) -> io::Result<()> {
    if listed.is_empty() {
        return writeln!(out, "No invoices logged yet.");
    }
    for row in listed {
        let e = &row.entry;
        writeln!(
            out,
            "{:>3}. {}  {:<22} {:<24} {:>10}  {}",
            row.index,
            e.created_at,
            e.invoice_number,
            e.school_name,
            format!("${}", e.total),
            e.document_path.as_deref().unwrap_or("-"),
        )?;
    }
    Ok(())
}

pub fn monthly(out: &mut impl Write, totals: &[MonthlyTotal]) -> io::Result<()> {
    if totals.is_empty() {
        return writeln!(out, "No invoices logged yet.");
    }
    for month in totals {
        writeln!(out, "{}  {:>12}", month.year_month, format!("${}", month.total))?;
    }
    Ok(())
}
