//! Line items and orders: the pricing model.

use serde::{Deserialize, Serialize};

use subtrack_core::{DomainError, DomainResult, Money, ValueObject};

/// Largest accepted unit price (1,000,000.00).
pub const MAX_UNIT_PRICE: Money = Money::from_cents(100_000_000);
/// Largest accepted quantity on one line.
pub const MAX_QUANTITY: u32 = 1_000_000;

/// One priced line: a catalog code or an ad-hoc item name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    name: String,
    quantity: u32,
    unit_price: Money,
}

impl LineItem {
    pub fn new(name: impl Into<String>, quantity: u32, unit_price: Money) -> DomainResult<Self> {
        let name = name.into();
        if unit_price.is_negative() {
            return Err(DomainError::validation(format!(
                "unit price for {name} must not be negative"
            )));
        }
        if unit_price > MAX_UNIT_PRICE {
            return Err(DomainError::validation(format!(
                "unit price for {name} exceeds maximum allowed ({MAX_UNIT_PRICE}), got {unit_price}"
            )));
        }
        if quantity > MAX_QUANTITY {
            return Err(DomainError::validation(format!(
                "quantity for {name} exceeds maximum allowed ({MAX_QUANTITY}), got {quantity}"
            )));
        }
        Ok(Self {
            name,
            quantity,
            unit_price,
        })
    }

    /// Catalog code for menu items, free text for extras.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// `quantity × unit_price`, rounded to cents.
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity).round_cents()
    }
}

impl ValueObject for LineItem {}

/// Priced collection of line items for one school delivery.
///
/// Orders are never mutated: recalculating means building a new one
/// (see [`Order::with_items`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    store_key: String,
    school_name: String,
    event_date: String,
    items: Vec<LineItem>,
}

impl Order {
    pub fn new(
        store_key: impl Into<String>,
        school_name: impl Into<String>,
        event_date: impl Into<String>,
        items: Vec<LineItem>,
    ) -> Self {
        Self {
            store_key: store_key.into(),
            school_name: school_name.into(),
            event_date: event_date.into(),
            items,
        }
    }

    /// Same store, school and date with a new set of lines.
    pub fn with_items(&self, items: Vec<LineItem>) -> Self {
        Self {
            items,
            ..self.clone()
        }
    }

    pub fn store_key(&self) -> &str {
        &self.store_key
    }

    pub fn school_name(&self) -> &str {
        &self.school_name
    }

    /// Date as entered; see `subtrack_core::format_delivery_date` for display.
    pub fn event_date(&self) -> &str {
        &self.event_date
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of per-line rounded totals.
    pub fn subtotal(&self) -> Money {
        self.items
            .iter()
            .map(LineItem::line_total)
            .sum::<Money>()
            .round_cents()
    }

    /// Schools are never charged delivery.
    pub fn delivery_fee(&self) -> Money {
        Money::ZERO
    }

    /// Invariant: `total >= subtotal`; equal while delivery is free.
    pub fn total(&self) -> Money {
        (self.subtotal() + self.delivery_fee()).round_cents()
    }
}

impl ValueObject for Order {}
