//! Runtime configuration.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | SUBTRACK_DATA_DIR | `data` | root for the invoice log, exports and documents |
//! | SUBTRACK_CATALOG | (built-in) | TOML catalog file |
//! | SUBTRACK_RENDERER | `text` | `text` or `none` |
//!
//! Command-line flags override the environment; see the `subtrack` binary.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use subtrack_catalog::Catalog;

use crate::export::OrderExporter;
use crate::invoice_log::{CsvInvoiceLogStore, InvoiceLog};
use crate::rendering::{DocumentRenderer, TextRenderer};

pub const DATA_DIR_VAR: &str = "SUBTRACK_DATA_DIR";
pub const CATALOG_VAR: &str = "SUBTRACK_CATALOG";
pub const RENDERER_VAR: &str = "SUBTRACK_RENDERER";

const DEFAULT_DATA_DIR: &str = "data";

/// Which document renderer to wire in.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum RendererKind {
    #[default]
    Text,
    /// Rendering disabled: finalizing produces no document and logs nothing.
    None,
}

impl FromStr for RendererKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(RendererKind::Text),
            "none" | "off" => Ok(RendererKind::None),
            other => Err(format!("unknown renderer {other:?} (expected text or none)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    /// `None` means the built-in catalog.
    pub catalog_path: Option<PathBuf>,
    pub renderer: RendererKind,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            catalog_path: None,
            renderer: RendererKind::default(),
        }
    }
}

impl AppConfig {
    /// Load from process environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let present = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let renderer = match present(RENDERER_VAR) {
            Some(raw) => raw.parse::<RendererKind>().unwrap_or_else(|err| {
                tracing::warn!(error = %err, "falling back to text renderer");
                RendererKind::Text
            }),
            None => RendererKind::default(),
        };

        Self {
            data_dir: present(DATA_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            catalog_path: present(CATALOG_VAR).map(PathBuf::from),
            renderer,
        }
    }

    pub fn invoice_log_path(&self) -> PathBuf {
        self.data_dir.join("invoice_log.csv")
    }

    pub fn export_dir(&self) -> PathBuf {
        self.data_dir.join("exports")
    }

    pub fn document_dir(&self) -> PathBuf {
        self.data_dir.join("documents")
    }

    pub fn catalog_path(&self) -> Option<&Path> {
        self.catalog_path.as_deref()
    }

    pub fn document_renderer(&self) -> Option<Arc<dyn DocumentRenderer>> {
        match self.renderer {
            RendererKind::Text => Some(Arc::new(TextRenderer::new(self.document_dir()))),
            RendererKind::None => None,
        }
    }

    /// CSV-backed log under the data directory.
    pub fn invoice_log(&self) -> InvoiceLog<CsvInvoiceLogStore> {
        InvoiceLog::new(CsvInvoiceLogStore::new(self.invoice_log_path()))
    }

    /// Exporter wired the way this configuration says.
    pub fn exporter(&self, catalog: Arc<Catalog>) -> OrderExporter<CsvInvoiceLogStore> {
        let exporter = OrderExporter::new(catalog, self.invoice_log(), self.export_dir());
        match self.document_renderer() {
            Some(renderer) => exporter.with_renderer(renderer),
            None => exporter,
        }
    }
}
