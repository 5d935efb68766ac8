//! The car-type ledger and its entries.

mod apply;
mod wire;

pub use apply::{apply, Action, Change, Mutation};

use crate::error::LedgerError;
use crate::ids::{CartId, ProductId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum quantity allowed per car type.
pub const MAX_QUANTITY_PER_CAR_TYPE: u32 = 9999;

/// A vehicle-fitment label such as `"Toyota Camry 2021"` or
/// `"Sedan Front Set"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarType(String);

impl CarType {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Label with runs of whitespace replaced by `-`, for element ids.
    pub fn slug(&self) -> String {
        self.0.split_whitespace().collect::<Vec<_>>().join("-")
    }
}

impl fmt::Display for CarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CarType {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CarType {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One (car type, quantity) pair within a product's selection list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarTypeEntry {
    #[serde(rename = "type")]
    pub car_type: CarType,
    pub quantity: u32,
}

impl CarTypeEntry {
    pub fn new(car_type: CarType, quantity: u32) -> Self {
        Self { car_type, quantity }
    }
}

/// Selections recorded for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductEntry {
    pub product_id: ProductId,
    pub product_name: String,
    pub car_types: Vec<CarTypeEntry>,
}

impl ProductEntry {
    pub(crate) fn empty(product_id: ProductId, product_name: String) -> Self {
        Self {
            product_id,
            product_name,
            car_types: Vec::new(),
        }
    }

    /// Get an entry by car type.
    pub fn entry(&self, car_type: &str) -> Option<&CarTypeEntry> {
        self.car_types.iter().find(|e| e.car_type.as_str() == car_type)
    }

    /// Sum of quantities across all car types.
    pub fn total_quantity(&self) -> u64 {
        self.car_types.iter().map(|e| u64::from(e.quantity)).sum()
    }

    /// Fold an entry in, summing with an existing entry of the same type.
    pub(crate) fn merge_entry(&mut self, entry: CarTypeEntry) {
        match self.car_types.iter_mut().find(|e| e.car_type == entry.car_type) {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .saturating_add(entry.quantity)
                    .min(MAX_QUANTITY_PER_CAR_TYPE);
            }
            None => self.car_types.push(entry),
        }
    }
}

/// Per-session record of which car types were chosen for which products.
///
/// Invariants, upheld by every constructor and by [`Ledger::apply`]:
/// product ids are unique, car types are unique within a product, every
/// quantity is at least 1, and no product has an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "wire::StoredLedger")]
pub struct Ledger {
    cart_id: CartId,
    product_details: Vec<ProductEntry>,
}

impl Ledger {
    /// Create an empty ledger bound to a cart.
    pub fn new(cart_id: CartId) -> Self {
        Self {
            cart_id,
            product_details: Vec::new(),
        }
    }

    pub(crate) fn from_parts(cart_id: CartId, product_details: Vec<ProductEntry>) -> Self {
        Self {
            cart_id,
            product_details,
        }
    }

    /// Decode a persisted ledger, normalising legacy entries.
    ///
    /// Fails only when the text is not JSON at all or not an object.
    pub fn from_json(json: &str) -> Result<Self, LedgerError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode in the canonical persisted shape.
    pub fn to_json(&self) -> Result<String, LedgerError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn cart_id(&self) -> &CartId {
        &self.cart_id
    }

    /// Point the ledger at the session cart. Returns true if it changed.
    pub fn sync_cart_id(&mut self, session: &CartId) -> bool {
        if &self.cart_id == session {
            return false;
        }
        self.cart_id = session.clone();
        true
    }

    /// Iterate over products in insertion order.
    pub fn products(&self) -> impl Iterator<Item = &ProductEntry> {
        self.product_details.iter()
    }

    /// Get a product by ID.
    pub fn product(&self, product_id: &ProductId) -> Option<&ProductEntry> {
        self.product_details.iter().find(|p| &p.product_id == product_id)
    }

    /// Quantity recorded for a car type, 0 when absent.
    pub fn quantity(&self, product_id: &ProductId, car_type: &str) -> u32 {
        self.product(product_id)
            .and_then(|p| p.entry(car_type))
            .map(|e| e.quantity)
            .unwrap_or(0)
    }

    /// Number of distinct car types recorded for a product.
    pub fn car_type_count(&self, product_id: &ProductId) -> usize {
        self.product(product_id).map(|p| p.car_types.len()).unwrap_or(0)
    }

    /// Sum of quantities recorded for a product.
    pub fn total_quantity(&self, product_id: &ProductId) -> u64 {
        self.product(product_id).map(|p| p.total_quantity()).unwrap_or(0)
    }

    /// Check if the ledger holds no selections.
    pub fn is_empty(&self) -> bool {
        self.product_details.is_empty()
    }

    fn product_index(&self, product_id: &ProductId) -> Option<usize> {
        self.product_details.iter().position(|p| &p.product_id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_json_shape() {
        let mut ledger = Ledger::new(CartId::new("c1"));
        ledger
            .apply(&Mutation::add("P1", "Product 1", "Sedan Front Set", 1))
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&ledger.to_json().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "cart_id": "c1",
                "product_details": [{
                    "product_id": "P1",
                    "product_name": "Product 1",
                    "car_types": [{"type": "Sedan Front Set", "quantity": 1}]
                }]
            })
        );
    }

    #[test]
    fn test_reload_is_stable() {
        let mut ledger = Ledger::new(CartId::new("c1"));
        ledger.apply(&Mutation::add("P1", "Mats", "SUV", 2)).unwrap();
        ledger.apply(&Mutation::add("P2", "Liner", "Van", 1)).unwrap();
        let reloaded = Ledger::from_json(&ledger.to_json().unwrap()).unwrap();
        assert_eq!(reloaded, ledger);
    }

    #[test]
    fn test_not_json_is_an_error() {
        assert!(matches!(
            Ledger::from_json("{not json"),
            Err(LedgerError::Serialization(_))
        ));
    }

    #[test]
    fn test_sync_cart_id() {
        let mut ledger = Ledger::new(CartId::new("old"));
        assert!(ledger.sync_cart_id(&CartId::new("new")));
        assert!(!ledger.sync_cart_id(&CartId::new("new")));
        assert_eq!(ledger.cart_id().as_str(), "new");
    }

    #[test]
    fn test_slug() {
        assert_eq!(CarType::new("Honda  Civic 2019").slug(), "Honda-Civic-2019");
    }
}
