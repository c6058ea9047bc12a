//! Document rendering collaborator.
//!
//! Rendering is an optional capability: callers hold an
//! `Option<Arc<dyn DocumentRenderer>>` and pricing, logging and exports work
//! the same with or without one.

mod text;

use std::path::PathBuf;

use subtrack_catalog::{School, Store};
use subtrack_core::Money;
use subtrack_pricing::Order;

pub use text::{TextRenderer, render_document};

/// Which document to produce from an order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DocumentKind {
    /// Priced invoice with a totals block.
    Invoice,
    /// Same lines without prices, for kitchen and packing.
    OrderForm,
}

impl DocumentKind {
    pub fn title(self) -> &'static str {
        match self {
            DocumentKind::Invoice => "INVOICE",
            DocumentKind::OrderForm => "ORDER FORM",
        }
    }

    pub fn file_prefix(self) -> &'static str {
        match self {
            DocumentKind::Invoice => "invoice",
            DocumentKind::OrderForm => "order_form",
        }
    }

    pub fn shows_prices(self) -> bool {
        matches!(self, DocumentKind::Invoice)
    }
}

/// Header metadata shared by both document kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMeta {
    pub invoice_number: String,
    /// `MM-DD-YYYY` (or the raw text when unparseable).
    pub formatted_date: String,
}

/// One resolved line as it appears on a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLine {
    pub code: String,
    pub label: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

/// Everything a renderer needs; rendering must depend on nothing else.
#[derive(Debug, Clone)]
pub struct RenderRequest<'a> {
    pub order: &'a Order,
    pub store: &'a Store,
    pub school: &'a School,
    pub lines: Vec<DocumentLine>,
    pub meta: DocumentMeta,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The renderer cannot run in this environment. Callers treat this as
    /// "no document produced", not as a failure.
    #[error("document rendering unavailable: {0}")]
    Unavailable(String),
    #[error("failed to write document: {0}")]
    Io(#[from] std::io::Error),
}

/// Produces a document file and returns where it was written.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, request: &RenderRequest<'_>, kind: DocumentKind) -> Result<PathBuf, RenderError>;
}
