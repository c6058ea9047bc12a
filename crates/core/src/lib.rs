//! `subtrack-core`: shared domain building blocks.
//!
//! This crate contains **pure domain** primitives (no I/O): the error model,
//! the currency value used for every price and total, and the delivery-date
//! formatting contract.

pub mod date;
pub mod entity;
pub mod error;
pub mod money;
pub mod value_object;

pub use date::{format_delivery_date, parse_delivery_date};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use money::Money;
pub use value_object::ValueObject;
