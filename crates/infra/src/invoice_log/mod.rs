//! Append-only invoice log and its query layer.
//!
//! Read paths never fail: a missing or unreadable table lists as empty.
//! Write paths propagate storage errors to the caller, with no retry.

mod csv_file;
mod store;

use std::path::Path;

use chrono::{Local, NaiveDateTime};

use subtrack_catalog::Catalog;
use subtrack_invoicing::{InvoiceLogEntry, ListedInvoice, MonthlyTotal, latest_first, monthly_totals};
use subtrack_pricing::Order;

pub use csv_file::{CsvInvoiceLogStore, LOG_HEADER};
pub use store::{InMemoryInvoiceLogStore, InvoiceLogError, InvoiceLogStore};

/// Ledger of finalized invoices over a swappable store.
#[derive(Debug, Clone)]
pub struct InvoiceLog<S> {
    store: S,
}

impl<S> InvoiceLog<S>
where
    S: InvoiceLogStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn ensure_initialized(&self) -> Result<(), InvoiceLogError> {
        self.store.ensure_initialized()
    }

    /// Append a row stamped with the current local time.
    ///
    /// No uniqueness check: the same invoice number may be logged twice.
    pub fn append(
        &self,
        catalog: &Catalog,
        order: &Order,
        invoice_number: &str,
        document_path: Option<&Path>,
    ) -> Result<InvoiceLogEntry, InvoiceLogError> {
        self.append_at(
            catalog,
            order,
            invoice_number,
            document_path,
            Local::now().naive_local(),
        )
    }

    /// Append a row with an explicit timestamp.
    pub fn append_at(
        &self,
        catalog: &Catalog,
        order: &Order,
        invoice_number: &str,
        document_path: Option<&Path>,
        created_at: NaiveDateTime,
    ) -> Result<InvoiceLogEntry, InvoiceLogError> {
        let store_name = match catalog.store(order.store_key()) {
            Ok(store) => store.name.clone(),
            Err(_) => {
                tracing::warn!(store_key = order.store_key(), "unknown store; logging empty store name");
                String::new()
            }
        };

        let entry = InvoiceLogEntry::from_order(
            order,
            store_name,
            invoice_number,
            document_path.map(|p| p.display().to_string()),
            created_at,
        );

        self.store.ensure_initialized()?;
        self.store.append(&entry)?;
        tracing::info!(
            invoice_number,
            total = %entry.total,
            "invoice logged"
        );
        Ok(entry)
    }

    /// Newest first, at most `limit` rows, numbered from 1.
    pub fn list(&self, limit: usize) -> Vec<ListedInvoice> {
        latest_first(self.load_or_empty(), limit)
    }

    /// Totals per `YYYY-MM`, newest month first.
    pub fn monthly_totals(&self) -> Vec<MonthlyTotal> {
        monthly_totals(&self.load_or_empty())
    }

    /// Remove every row with this invoice number.
    ///
    /// Returns `false` (and leaves the table untouched) when nothing matched.
    pub fn delete_by_invoice_number(&self, invoice_number: &str) -> Result<bool, InvoiceLogError> {
        let entries = self.store.load()?;
        let before = entries.len();
        let kept: Vec<InvoiceLogEntry> = entries
            .into_iter()
            .filter(|e| e.invoice_number != invoice_number)
            .collect();

        let removed = before - kept.len();
        if removed == 0 {
            return Ok(false);
        }

        self.store.replace_all(&kept)?;
        tracing::info!(invoice_number, removed, "invoice log rows deleted");
        Ok(true)
    }

    /// Truncate to header-only. Later appends keep working.
    pub fn delete_all(&self) -> Result<(), InvoiceLogError> {
        self.store.truncate()?;
        tracing::info!("invoice log cleared");
        Ok(())
    }

    fn load_or_empty(&self) -> Vec<InvoiceLogEntry> {
        match self.store.load() {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(error = %err, "invoice log unreadable; treating as empty");
                Vec::new()
            }
        }
    }
}
