//! Invoice number derivation.

use subtrack_catalog::Catalog;
use subtrack_core::format_delivery_date;
use subtrack_pricing::Order;

/// `<schoolCode>-<MM-DD-YYYY>`.
///
/// Not unique: two orders for the same school and delivery date share a
/// number.
pub fn derive_invoice_number(school_code: &str, event_date: &str) -> String {
    format!("{school_code}-{}", format_delivery_date(event_date))
}

/// Invoice number for an order, using `GEN000` for unlisted schools.
pub fn invoice_number_for(catalog: &Catalog, order: &Order) -> String {
    derive_invoice_number(catalog.school_code(order.school_name()), order.event_date())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_uses_school_code_and_formatted_date() {
        let catalog = Catalog::builtin().unwrap();
        let order = Order::new("S01", "Lincoln Elementary", "2025-01-15", vec![]);
        assert_eq!(invoice_number_for(&catalog, &order), "LIN001-01-15-2025");
    }

    #[test]
    fn unlisted_school_uses_generic_code() {
        let catalog = Catalog::builtin().unwrap();
        let order = Order::new("S01", "Pop-up Camp", "01/02/2025", vec![]);
        assert_eq!(invoice_number_for(&catalog, &order), "GEN000-01-02-2025");
    }

    #[test]
    fn same_school_and_date_collide() {
        assert_eq!(
            derive_invoice_number("LIN001", "2025-01-15"),
            derive_invoice_number("LIN001", "01-15-2025")
        );
    }

    #[test]
    fn unparseable_date_is_embedded_verbatim() {
        assert_eq!(derive_invoice_number("LIN001", "tbd"), "LIN001-tbd");
    }
}
