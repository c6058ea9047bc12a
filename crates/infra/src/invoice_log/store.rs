//! Storage trait for the invoice log and its in-memory implementation.

use std::sync::{Arc, RwLock};

use subtrack_invoicing::InvoiceLogEntry;

/// Invoice log storage abstraction.
///
/// One flat table, header plus rows. Deletes are "load everything, filter in
/// memory, rewrite": one writer at a time, no locking across calls.
pub trait InvoiceLogStore: Send + Sync {
    /// Create the empty table if it does not exist yet. Idempotent.
    fn ensure_initialized(&self) -> Result<(), InvoiceLogError>;

    /// Append one row (creating the table first if needed).
    fn append(&self, entry: &InvoiceLogEntry) -> Result<(), InvoiceLogError>;

    /// All rows in append order. A missing table reads as empty.
    fn load(&self) -> Result<Vec<InvoiceLogEntry>, InvoiceLogError>;

    /// Replace the table contents with `entries`.
    fn replace_all(&self, entries: &[InvoiceLogEntry]) -> Result<(), InvoiceLogError>;

    /// Back to header-only.
    fn truncate(&self) -> Result<(), InvoiceLogError> {
        self.replace_all(&[])
    }
}

/// Invoice log storage error.
#[derive(Debug, thiserror::Error)]
pub enum InvoiceLogError {
    #[error("invoice log I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invoice log encoding failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("invoice log lock poisoned")]
    Poisoned,
}

impl<S> InvoiceLogStore for Arc<S>
where
    S: InvoiceLogStore + ?Sized,
{
    fn ensure_initialized(&self) -> Result<(), InvoiceLogError> {
        (**self).ensure_initialized()
    }

    fn append(&self, entry: &InvoiceLogEntry) -> Result<(), InvoiceLogError> {
        (**self).append(entry)
    }

    fn load(&self) -> Result<Vec<InvoiceLogEntry>, InvoiceLogError> {
        (**self).load()
    }

    fn replace_all(&self, entries: &[InvoiceLogEntry]) -> Result<(), InvoiceLogError> {
        (**self).replace_all(entries)
    }

    fn truncate(&self) -> Result<(), InvoiceLogError> {
        (**self).truncate()
    }
}

/// In-memory invoice log for tests/dev.
///
/// `None` models "table not created yet".
#[derive(Debug, Default)]
pub struct InMemoryInvoiceLogStore {
    rows: RwLock<Option<Vec<InvoiceLogEntry>>>,
}

impl InMemoryInvoiceLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn is_initialized(&self) -> bool {
        self.rows.read().map(|rows| rows.is_some()).unwrap_or(false)
    }
}

impl InvoiceLogStore for InMemoryInvoiceLogStore {
    fn ensure_initialized(&self) -> Result<(), InvoiceLogError> {
        let mut rows = self.rows.write().map_err(|_| InvoiceLogError::Poisoned)?;
        rows.get_or_insert_with(Vec::new);
        Ok(())
    }

    fn append(&self, entry: &InvoiceLogEntry) -> Result<(), InvoiceLogError> {
        let mut rows = self.rows.write().map_err(|_| InvoiceLogError::Poisoned)?;
        rows.get_or_insert_with(Vec::new).push(entry.clone());
        Ok(())
    }

    fn load(&self) -> Result<Vec<InvoiceLogEntry>, InvoiceLogError> {
        let rows = self.rows.read().map_err(|_| InvoiceLogError::Poisoned)?;
        Ok(rows.clone().unwrap_or_default())
    }

    fn replace_all(&self, entries: &[InvoiceLogEntry]) -> Result<(), InvoiceLogError> {
        let mut rows = self.rows.write().map_err(|_| InvoiceLogError::Poisoned)?;
        *rows = Some(entries.to_vec());
        Ok(())
    }
}
