//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. `Money`, line
/// items and orders are value objects: to "change" one, build a new one.
///
/// ```ignore
/// let a = Money::from_cents(360);
/// let b: Money = "3.60".parse()?;
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
