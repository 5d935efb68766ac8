//! Ledger invariants under arbitrary mutation sequences.

use std::collections::HashSet;

use fitment_ledger::prelude::*;
use proptest::prelude::*;

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Add),
        Just(Action::Increase),
        Just(Action::Decrease),
        Just(Action::SetQuantity),
        Just(Action::Remove),
    ]
}

fn mutation() -> impl Strategy<Value = Mutation> {
    (
        prop::sample::select(vec!["P1", "P2", "P3"]),
        prop::sample::select(vec!["SUV", "Sedan Front Set", "Toyota Camry 2021"]),
        action(),
        0u32..6,
    )
        .prop_map(|(product, car_type, action, quantity)| {
            Mutation::new(product, format!("Name of {}", product), car_type, action, quantity)
        })
}

fn assert_invariants(ledger: &Ledger) {
    let mut products = HashSet::new();
    for product in ledger.products() {
        assert!(products.insert(product.product_id.clone()), "duplicate product");
        assert!(!product.car_types.is_empty(), "empty product kept");
        let mut types = HashSet::new();
        for entry in &product.car_types {
            assert!(types.insert(entry.car_type.clone()), "duplicate car type");
            assert!(entry.quantity > 0, "non-positive quantity kept");
        }
    }
}

proptest! {
    #[test]
    fn prop_invariants_hold_for_any_sequence(mutations in prop::collection::vec(mutation(), 0..40)) {
        let mut ledger = Ledger::new(CartId::new("c1"));
        for m in &mutations {
            // zero-quantity adds are rejected; the ledger must be unchanged
            let before = ledger.clone();
            if ledger.apply(m).is_err() {
                prop_assert_eq!(&ledger, &before);
            }
            assert_invariants(&ledger);
        }
        let reloaded = Ledger::from_json(&ledger.to_json().unwrap()).unwrap();
        prop_assert_eq!(reloaded, ledger);
    }

    #[test]
    fn prop_add_then_decrease_round_trips_to_empty(quantity in 1u32..20) {
        let mut ledger = Ledger::new(CartId::new("c1"));
        ledger.apply(&Mutation::add("P1", "Mats", "SUV", quantity)).unwrap();
        for _ in 0..quantity {
            ledger.apply(&Mutation::decrease("P1", "SUV")).unwrap();
        }
        prop_assert!(ledger.product(&ProductId::new("P1")).is_none());
    }

    #[test]
    fn prop_set_quantity_zero_always_removes(start in 1u32..50, other in any::<bool>()) {
        let mut ledger = Ledger::new(CartId::new("c1"));
        ledger.apply(&Mutation::add("P1", "Mats", "SUV", start)).unwrap();
        if other {
            ledger.apply(&Mutation::add("P1", "Mats", "Van", 1)).unwrap();
        }
        ledger.apply(&Mutation::set_quantity("P1", "Mats", "SUV", 0)).unwrap();
        prop_assert_eq!(ledger.quantity(&ProductId::new("P1"), "SUV"), 0);
        prop_assert_eq!(ledger.product(&ProductId::new("P1")).is_some(), other);
    }
}

#[test]
fn legacy_ledger_normalizes_before_mutation() {
    let mut ledger = Ledger::from_json(
        r#"{"cart_id":"c1","product_details":[
            {"product_id":"P1","product_name":"Mats","car_types":["SUV"]},
            {"product_id":"P2","product_name":"Liner","car_types":["Sedan","Coupe"]}]}"#,
    )
    .unwrap();

    ledger.apply(&Mutation::add("P1", "Mats", "SUV", 1)).unwrap();

    let json: serde_json::Value = serde_json::from_str(&ledger.to_json().unwrap()).unwrap();
    assert_eq!(
        json["product_details"][0]["car_types"],
        serde_json::json!([{"type": "SUV", "quantity": 2}])
    );
    // untouched product is migrated too
    assert_eq!(
        json["product_details"][1]["car_types"],
        serde_json::json!([{"type": "Sedan", "quantity": 1}, {"type": "Coupe", "quantity": 1}])
    );
}
