//! Plain-text projections of a ledger.

use crate::ids::{CartId, ProductId};
use crate::ledger::{CarType, Ledger};

/// Separator written between products in [`summary_text`].
pub const PRODUCT_SEPARATOR: &str = "\n-----------------------------------\n\n";

/// Human-readable summary of every selection, one block per product.
///
/// This is the text mirrored into the order note so the selections travel
/// with the order.
pub fn summary_text(ledger: &Ledger) -> String {
    if ledger.is_empty() {
        return "No car types selected yet.".to_string();
    }

    let blocks: Vec<String> = ledger
        .products()
        .map(|product| {
            let mut block = format!("Product: {}\n", product.product_name);
            if product.car_types.is_empty() {
                block.push_str("No car types selected for this product.\n");
                return block;
            }
            block.push_str("Selected Car Types:\n");
            for entry in &product.car_types {
                block.push_str(&format!("  - {}: {}\n", entry.car_type, entry.quantity));
            }
            block
        })
        .collect();

    blocks.join(PRODUCT_SEPARATOR)
}

/// Vehicle labels chosen for a product, for the cart line listing.
///
/// Returns nothing unless the ledger belongs to the current cart session, so
/// selections from an abandoned cart never show against a new one.
pub fn vehicle_labels<'a>(
    ledger: &'a Ledger,
    session_cart: &CartId,
    product_id: &ProductId,
) -> Vec<&'a CarType> {
    if ledger.cart_id() != session_cart {
        return Vec::new();
    }
    ledger
        .product(product_id)
        .map(|p| p.car_types.iter().map(|e| &e.car_type).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Mutation;

    fn sample() -> Ledger {
        let mut ledger = Ledger::new(CartId::new("c1"));
        ledger.apply(&Mutation::add("P1", "Floor Mats", "Toyota Camry 2021", 2)).unwrap();
        ledger.apply(&Mutation::add("P1", "Floor Mats", "Honda Civic 2019", 1)).unwrap();
        ledger.apply(&Mutation::add("P2", "Trunk Liner", "Ford F-150 2020", 1)).unwrap();
        ledger
    }

    #[test]
    fn test_summary_text() {
        let text = summary_text(&sample());
        assert_eq!(
            text,
            "Product: Floor Mats\n\
             Selected Car Types:\n  - Toyota Camry 2021: 2\n  - Honda Civic 2019: 1\n\
             \n-----------------------------------\n\n\
             Product: Trunk Liner\n\
             Selected Car Types:\n  - Ford F-150 2020: 1\n"
        );
    }

    #[test]
    fn test_summary_of_empty_ledger() {
        assert_eq!(summary_text(&Ledger::default()), "No car types selected yet.");
    }

    #[test]
    fn test_vehicle_labels_require_matching_cart() {
        let ledger = sample();
        let labels = vehicle_labels(&ledger, &CartId::new("c1"), &"P1".into());
        let labels: Vec<&str> = labels.iter().map(|c| c.as_str()).collect();
        assert_eq!(labels, vec!["Toyota Camry 2021", "Honda Civic 2019"]);

        assert!(vehicle_labels(&ledger, &CartId::new("other"), &"P1".into()).is_empty());
        assert!(vehicle_labels(&ledger, &CartId::new("c1"), &"P3".into()).is_empty());
    }
}
