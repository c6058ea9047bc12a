//! Invoice ledger domain (pure, no I/O).
//!
//! Defines what one finalized invoice looks like in the append-only log, how
//! invoice numbers are derived, and the read-side queries (latest first,
//! monthly totals) over a set of log entries. Storage lives in
//! `subtrack-infra`.

pub mod entry;
pub mod number;
pub mod query;

pub use entry::{CREATED_AT_FORMAT, InvoiceLogEntry, ListedInvoice, MonthlyTotal};
pub use number::{derive_invoice_number, invoice_number_for};
pub use query::{latest_first, monthly_totals};
