//! Export adapters: detail rows, CSV export, and finalizing documents.

mod detail;
mod finalize;

use subtrack_core::DomainError;

use crate::invoice_log::InvoiceLogError;
use crate::rendering::RenderError;

pub use detail::{DETAIL_HEADER, DetailRow, detail_rows, write_detail_csv};
pub use finalize::{FinalizedInvoice, OrderExporter};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Log(#[from] InvoiceLogError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("failed to write export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Invoice number made safe for use in a file name.
pub fn safe_file_stem(invoice_number: &str) -> String {
    let stem: String = invoice_number
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() { "order".to_string() } else { stem }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_stem_replaces_unsafe_characters() {
        assert_eq!(safe_file_stem("LIN001-01-15-2025"), "LIN001-01-15-2025");
        assert_eq!(safe_file_stem("GEN000-next tuesday/2"), "GEN000-next_tuesday_2");
        assert_eq!(safe_file_stem("  "), "order");
    }
}
