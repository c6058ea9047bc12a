//! Invoice log row types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use subtrack_core::{Money, format_delivery_date};
use subtrack_pricing::Order;

/// Timestamp format of `created_at` (ISO-8601, seconds precision).
///
/// Lexicographic order of these strings is chronological order.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One row of the invoice log.
///
/// `created_at` stays a string: rows written by hand or by older tools may
/// carry anything there, and reads must not fail on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLogEntry {
    pub created_at: String,
    pub store_key: String,
    pub store_name: String,
    pub school_name: String,
    /// `MM-DD-YYYY` when the order date was parseable.
    pub delivery_date: String,
    pub subtotal: Money,
    pub total: Money,
    pub invoice_number: String,
    pub document_path: Option<String>,
}

impl InvoiceLogEntry {
    /// Summary row for a finalized order.
    pub fn from_order(
        order: &Order,
        store_name: impl Into<String>,
        invoice_number: impl Into<String>,
        document_path: Option<String>,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            created_at: created_at.format(CREATED_AT_FORMAT).to_string(),
            store_key: order.store_key().to_string(),
            store_name: store_name.into(),
            school_name: order.school_name().to_string(),
            delivery_date: format_delivery_date(order.event_date()),
            subtotal: order.subtotal(),
            total: order.total(),
            invoice_number: invoice_number.into(),
            document_path,
        }
    }

    /// `YYYY-MM` prefix of `created_at`, if it has one.
    pub fn year_month(&self) -> Option<&str> {
        let prefix = self.created_at.get(..7)?;
        let bytes = prefix.as_bytes();
        let well_formed = bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[4] == b'-'
            && bytes[5..].iter().all(u8::is_ascii_digit);
        well_formed.then_some(prefix)
    }
}

/// Log entry with its display position in a listing.
///
/// `index` is 1-based and recomputed on every read; it is not a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedInvoice {
    pub index: usize,
    #[serde(flatten)]
    pub entry: InvoiceLogEntry,
}

/// Sum of invoice totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTotal {
    /// `YYYY-MM`.
    pub year_month: String,
    pub total: Money,
}
