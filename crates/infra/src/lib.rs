//! Infrastructure layer: the invoice log store, document rendering, file
//! exports and runtime configuration.

pub mod config;
pub mod export;
pub mod invoice_log;
pub mod rendering;


pub use config::{AppConfig, RendererKind};
pub use export::{ExportError, FinalizedInvoice, OrderExporter};
pub use invoice_log::{
    CsvInvoiceLogStore, InMemoryInvoiceLogStore, InvoiceLog, InvoiceLogError, InvoiceLogStore,
};
pub use rendering::{DocumentKind, DocumentRenderer, RenderError, RenderRequest, TextRenderer};
