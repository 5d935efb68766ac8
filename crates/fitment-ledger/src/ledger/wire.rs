//! Persisted (cookie) shape of the ledger and its normalisation.
//!
//! Older storefront builds wrote `car_types` as bare strings, left out
//! `quantity`, wrote quantities as strings, and sometimes product ids as
//! numbers. Everything is folded into the canonical [`Ledger`] here, once,
//! so nothing downstream has to look at the raw shape again.

use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::Value;

use crate::ids::{CartId, ProductId};
use crate::ledger::{CarType, CarTypeEntry, Ledger, ProductEntry, MAX_QUANTITY_PER_CAR_TYPE};

/// Accepts a value of the expected shape, or swallows anything else.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Lenient<T> {
    Valid(T),
    Invalid(IgnoredAny),
}

impl<T> Default for Lenient<T> {
    fn default() -> Self {
        Lenient::Invalid(IgnoredAny)
    }
}

impl<T> Lenient<T> {
    fn into_option(self) -> Option<T> {
        match self {
            Lenient::Valid(v) => Some(v),
            Lenient::Invalid(_) => None,
        }
    }
}

/// A string the storefront may have written as a JSON number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Number(n) => n.to_string(),
        }
    }
}

/// The ledger exactly as found in the cookie.
#[derive(Debug, Default, Deserialize)]
pub struct StoredLedger {
    #[serde(default)]
    cart_id: Lenient<Scalar>,
    #[serde(default)]
    product_details: Lenient<Vec<Lenient<StoredProduct>>>,
}

#[derive(Debug, Deserialize)]
struct StoredProduct {
    product_id: Scalar,
    #[serde(default)]
    product_name: Lenient<String>,
    #[serde(default)]
    car_types: Lenient<Vec<StoredCarType>>,
}

/// One persisted car-type item, in either of its historical forms.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum StoredCarType {
    /// Pre-quantity form: the label alone, quantity 1.
    Legacy(String),
    /// Current form.
    Entry {
        #[serde(rename = "type")]
        car_type: Scalar,
        #[serde(default)]
        quantity: Lenient<Scalar>,
    },
    /// Anything else; numbers are kept as labels, the rest is dropped.
    Other(Value),
}

impl StoredCarType {
    /// Convert to a canonical entry. `None` means the item is discarded.
    fn normalize(self) -> Option<CarTypeEntry> {
        let (label, quantity) = match self {
            StoredCarType::Legacy(label) => (label, 1),
            StoredCarType::Entry { car_type, quantity } => {
                (car_type.into_string(), quantity_from(quantity.into_option()))
            }
            StoredCarType::Other(Value::Number(n)) => (n.to_string(), 1),
            StoredCarType::Other(_) => return None,
        };

        if label.trim().is_empty() || quantity <= 0 {
            return None;
        }
        let quantity = quantity.min(i64::from(MAX_QUANTITY_PER_CAR_TYPE)) as u32;
        Some(CarTypeEntry::new(CarType::new(label), quantity))
    }
}

/// Integer parse with the storefront's leniency: missing, zero, or garbage
/// reads as 1; fractional values truncate.
fn quantity_from(raw: Option<Scalar>) -> i64 {
    let parsed = match raw {
        None => None,
        Some(Scalar::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Some(Scalar::Text(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
    };
    match parsed {
        None | Some(0) => 1,
        Some(q) => q,
    }
}

impl From<StoredLedger> for Ledger {
    fn from(stored: StoredLedger) -> Self {
        let cart_id = stored
            .cart_id
            .into_option()
            .map(|s| CartId::new(s.into_string()))
            .unwrap_or_default();

        let mut products: Vec<ProductEntry> = Vec::new();
        let raw_products = stored.product_details.into_option().unwrap_or_default();

        for raw in raw_products.into_iter().filter_map(Lenient::into_option) {
            let product_id = ProductId::new(raw.product_id.into_string());
            if product_id.is_blank() {
                continue;
            }
            let name = raw.product_name.into_option().unwrap_or_default();
            let entries = raw
                .car_types
                .into_option()
                .unwrap_or_default()
                .into_iter()
                .filter_map(StoredCarType::normalize);

            let index = match products.iter().position(|p| p.product_id == product_id) {
                Some(index) => index,
                None => {
                    products.push(ProductEntry::empty(product_id, String::new()));
                    products.len() - 1
                }
            };
            let product = &mut products[index];
            if !name.trim().is_empty() {
                product.product_name = name;
            }
            for entry in entries {
                product.merge_entry(entry);
            }
        }

        products.retain(|p| !p.car_types.is_empty());
        for product in &mut products {
            if product.product_name.trim().is_empty() {
                product.product_name = product.product_id.fallback_name();
            }
        }

        Ledger::from_parts(cart_id, products)
    }
}
