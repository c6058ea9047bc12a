//! Finalizing orders into rendered documents and log rows.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use subtrack_catalog::Catalog;
use subtrack_core::format_delivery_date;
use subtrack_invoicing::invoice_number_for;
use subtrack_pricing::Order;

use crate::invoice_log::{InvoiceLog, InvoiceLogStore};
use crate::rendering::{
    DocumentKind, DocumentLine, DocumentMeta, DocumentRenderer, RenderError, RenderRequest,
};

use super::detail::{detail_rows, write_detail_csv};
use super::{ExportError, safe_file_stem};

/// Result of finalizing an invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedInvoice {
    pub invoice_number: String,
    pub document_path: PathBuf,
}

/// Couples pricing, catalog, invoice log and the (optional) renderer.
///
/// Finalizing an invoice renders first and logs second: a failed render
/// leaves no log row. A crash between the two leaves an unlogged document.
pub struct OrderExporter<S> {
    catalog: Arc<Catalog>,
    log: InvoiceLog<S>,
    renderer: Option<Arc<dyn DocumentRenderer>>,
    export_dir: PathBuf,
}

impl<S> OrderExporter<S>
where
    S: InvoiceLogStore,
{
    pub fn new(catalog: Arc<Catalog>, log: InvoiceLog<S>, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            catalog,
            log,
            renderer: None,
            export_dir: export_dir.into(),
        }
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn DocumentRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn log(&self) -> &InvoiceLog<S> {
        &self.log
    }

    pub fn invoice_number(&self, order: &Order) -> String {
        invoice_number_for(&self.catalog, order)
    }

    /// Write the detail CSV to `<export_dir>/<invoice number>.csv`.
    pub fn export_detail(&self, order: &Order) -> Result<PathBuf, ExportError> {
        let rows = detail_rows(&self.catalog, order);
        let path = self
            .export_dir
            .join(format!("{}.csv", safe_file_stem(&self.invoice_number(order))));
        write_detail_csv(&path, &rows)?;
        tracing::info!(rows = rows.len(), "detail export written to {:?}", path);
        Ok(path)
    }

    /// Render the priced invoice, then append it to the invoice log.
    ///
    /// `Ok(None)` means no document was produced (no renderer available);
    /// nothing is logged in that case.
    pub fn finalize_invoice(&self, order: &Order) -> Result<Option<FinalizedInvoice>, ExportError> {
        let invoice_number = self.invoice_number(order);
        let Some(document_path) = self.render(order, &invoice_number, DocumentKind::Invoice)? else {
            return Ok(None);
        };

        self.log
            .append(&self.catalog, order, &invoice_number, Some(&document_path))?;

        Ok(Some(FinalizedInvoice {
            invoice_number,
            document_path,
        }))
    }

    /// Render the price-free order form. Never touches the invoice log.
    pub fn finalize_order_form(&self, order: &Order) -> Result<Option<PathBuf>, ExportError> {
        let invoice_number = self.invoice_number(order);
        self.render(order, &invoice_number, DocumentKind::OrderForm)
    }

    fn render(
        &self,
        order: &Order,
        invoice_number: &str,
        kind: DocumentKind,
    ) -> Result<Option<PathBuf>, ExportError> {
        let store = self.catalog.store(order.store_key())?;
        let school = self.catalog.school(order.school_name());

        let Some(renderer) = self.renderer.as_ref() else {
            tracing::info!(kind = kind.title(), "no document renderer configured; skipping");
            return Ok(None);
        };

        let request = RenderRequest {
            order,
            store,
            school: &school,
            lines: self.document_lines(order),
            meta: DocumentMeta {
                invoice_number: invoice_number.to_string(),
                formatted_date: format_delivery_date(order.event_date()),
            },
        };

        match renderer.render(&request, kind) {
            Ok(path) => Ok(Some(path)),
            Err(RenderError::Unavailable(reason)) => {
                tracing::warn!(kind = kind.title(), reason = %reason, "document renderer unavailable");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn document_lines(&self, order: &Order) -> Vec<DocumentLine> {
        order
            .items()
            .iter()
            .map(|line| DocumentLine {
                code: line.name().to_string(),
                label: self
                    .catalog
                    .menu_item(line.name())
                    .map(|item| item.label.clone())
                    .unwrap_or_else(|_| line.name().to_string()),
                quantity: line.quantity(),
                unit_price: line.unit_price(),
                line_total: line.line_total(),
            })
            .collect()
    }
}

impl<S> OrderExporter<S> {
    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice_log::InMemoryInvoiceLogStore;
    use subtrack_core::Money;
    use subtrack_pricing::LineItem;

    fn exporter(dir: &Path) -> OrderExporter<InMemoryInvoiceLogStore> {
        OrderExporter::new(
            Arc::new(Catalog::builtin().unwrap()),
            InvoiceLog::new(InMemoryInvoiceLogStore::new()),
            dir.join("exports"),
        )
    }

    fn lincoln_order() -> Order {
        Order::new(
            "S01",
            "Lincoln Elementary",
            "2025-01-15",
            vec![
                LineItem::new("M001", 3, Money::from_cents(360)).unwrap(),
                LineItem::new("Cookies", 2, Money::from_cents(125)).unwrap(),
            ],
        )
    }

    #[test]
    fn export_detail_writes_one_row_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = exporter(dir.path());

        let path = exporter.export_detail(&lincoln_order()).unwrap();
        assert_eq!(path, dir.path().join("exports").join("LIN001-01-15-2025.csv"));

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("Turkey & Cheese"));
        assert!(lines[2].contains("Cookies"));
    }

    #[test]
    fn without_renderer_nothing_is_produced_or_logged() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = exporter(dir.path());
        assert!(!exporter.has_renderer());

        assert_eq!(exporter.finalize_invoice(&lincoln_order()).unwrap(), None);
        assert_eq!(exporter.finalize_order_form(&lincoln_order()).unwrap(), None);
        assert!(exporter.log().list(10).is_empty());
    }

    #[test]
    fn unknown_store_fails_finalize_with_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = exporter(dir.path());
        let order = Order::new("S99", "Lincoln Elementary", "2025-01-15", vec![]);

        let err = exporter.finalize_invoice(&order).unwrap_err();
        assert!(matches!(err, ExportError::Domain(ref e) if e.is_not_found()));
    }
}
