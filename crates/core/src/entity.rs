//! Entity trait: reference data identified by a stable key.

/// Entity marker + minimal interface.
///
/// Catalog records (stores, schools, menu items) are entities: two records with
/// the same key are the same record, whatever their other fields say.
pub trait Entity {
    /// Key type (string codes for all catalog records).
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity key.
    fn id(&self) -> &Self::Id;
}
