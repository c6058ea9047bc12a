//! Order pricing (pure, deterministic, no I/O).
//!
//! Line totals are rounded to cents per line; the subtotal is the sum of
//! those already-rounded amounts.

pub mod form;
pub mod order;

pub use form::{ExtraItem, order_from_quantities};
pub use order::{LineItem, MAX_QUANTITY, MAX_UNIT_PRICE, Order};
