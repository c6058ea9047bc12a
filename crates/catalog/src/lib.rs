//! Catalog reference data: stores, schools and the sandwich menu.
//!
//! The catalog is loaded once at startup (from a TOML file or the built-in
//! defaults) and is read-only afterwards.

pub mod catalog;
pub mod loader;
pub mod records;

pub use catalog::{Catalog, GENERIC_SCHOOL_CODE};
pub use loader::{CatalogLoadError, load_catalog};
pub use records::{CatalogItem, School, Store};
