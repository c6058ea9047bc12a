//! Order-form boundary: entered quantities in, `Order` out.
//!
//! Zero quantities are dropped here, never inside the model.

use std::collections::HashMap;

use subtrack_catalog::Catalog;
use subtrack_core::{DomainError, DomainResult, Money};

use crate::order::{LineItem, Order};

/// Side or drink entered by hand rather than picked from the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraItem {
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
}

/// Build an order from per-code quantities plus ad-hoc extras.
///
/// Menu lines come first in canonical catalog order, then extras in the order
/// given. Lines with a zero quantity are skipped. Codes absent from the
/// catalog fail with `NotFound`.
pub fn order_from_quantities(
    catalog: &Catalog,
    store_key: &str,
    school_name: &str,
    event_date: &str,
    quantities: &HashMap<String, u32>,
    extras: &[ExtraItem],
) -> DomainResult<Order> {
    if let Some(unknown) = quantities.keys().find(|code| catalog.menu_item(code).is_err()) {
        return Err(DomainError::not_found("menu item", unknown.as_str()));
    }

    let mut items = Vec::new();
    for item in catalog.items() {
        match quantities.get(&item.code) {
            Some(&qty) if qty > 0 => {
                items.push(LineItem::new(item.code.clone(), qty, item.unit_price)?);
            }
            _ => {}
        }
    }

    for extra in extras.iter().filter(|e| e.quantity > 0) {
        items.push(LineItem::new(extra.name.clone(), extra.quantity, extra.unit_price)?);
    }

    Ok(Order::new(store_key, school_name, event_date, items))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quantities(pairs: &[(&str, u32)]) -> HashMap<String, u32> {
        pairs.iter().map(|(c, q)| (c.to_string(), *q)).collect()
    }

    #[test]
    fn builds_lines_in_catalog_order_and_skips_zeroes() {
        let catalog = Catalog::builtin().unwrap();
        let order = order_from_quantities(
            &catalog,
            "S01",
            "Lincoln Elementary",
            "2025-01-15",
            &quantities(&[("M005", 2), ("M002", 0), ("M001", 3)]),
            &[],
        )
        .unwrap();

        let names: Vec<&str> = order.items().iter().map(LineItem::name).collect();
        assert_eq!(names, vec!["M001", "M005"]);
        assert_eq!(order.subtotal(), Money::from_cents(1780));
        assert_eq!(order.total(), Money::from_cents(1780));
    }

    #[test]
    fn extras_follow_menu_lines() {
        let catalog = Catalog::builtin().unwrap();
        let extras = vec![
            ExtraItem {
                name: "Chips".to_string(),
                unit_price: Money::from_cents(125),
                quantity: 4,
            },
            ExtraItem {
                name: "Cookies".to_string(),
                unit_price: Money::from_cents(100),
                quantity: 0,
            },
        ];
        let order = order_from_quantities(
            &catalog,
            "S01",
            "Lincoln Elementary",
            "",
            &quantities(&[("M001", 1)]),
            &extras,
        )
        .unwrap();

        assert_eq!(order.items().len(), 2);
        assert_eq!(order.items()[1].name(), "Chips");
        assert_eq!(order.subtotal(), Money::from_cents(860));
    }

    #[test]
    fn unknown_code_is_not_found() {
        let catalog = Catalog::builtin().unwrap();
        let err = order_from_quantities(
            &catalog,
            "S01",
            "Lincoln Elementary",
            "",
            &quantities(&[("ZZZ", 1)]),
            &[],
        )
        .unwrap_err();
        assert_eq!(err, DomainError::not_found("menu item", "ZZZ"));
    }
}
