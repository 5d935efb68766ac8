//! Ledger mutations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::ids::ProductId;
use crate::ledger::{CarType, CarTypeEntry, Ledger, ProductEntry, MAX_QUANTITY_PER_CAR_TYPE};

/// What a mutation does to a `(product, car type)` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    /// Insert, or add `quantity` to an existing entry.
    Add,
    /// Same as `Add`; issued by the `+` control.
    Increase,
    /// Subtract one, removing the entry at zero.
    Decrease,
    /// Set an absolute quantity; zero removes.
    SetQuantity,
    /// Delete the entry outright.
    Remove,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Add => "add",
            Action::Increase => "increase",
            Action::Decrease => "decrease",
            Action::SetQuantity => "setQuantity",
            Action::Remove => "remove",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = LedgerError;

    /// Accepts the names used by the storefront controls, including the
    /// `plus`/`minus` button names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Action::Add),
            "increase" | "plus" => Ok(Action::Increase),
            "decrease" | "minus" => Ok(Action::Decrease),
            "setQuantity" | "set_quantity" | "set" => Ok(Action::SetQuantity),
            "remove" => Ok(Action::Remove),
            other => Err(LedgerError::InvalidMutation(format!("unknown action '{}'", other))),
        }
    }
}

/// A request to change one `(product, car type)` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub product_id: ProductId,
    /// Latest known product title; blank keeps whatever the ledger has.
    pub product_name: String,
    pub car_type: CarType,
    pub action: Action,
    /// Ignored by `Decrease` and `Remove`.
    pub quantity: u32,
}

impl Mutation {
    pub fn new(
        product_id: impl Into<ProductId>,
        product_name: impl Into<String>,
        car_type: impl Into<CarType>,
        action: Action,
        quantity: u32,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            car_type: car_type.into(),
            action,
            quantity,
        }
    }

    pub fn add(
        product_id: impl Into<ProductId>,
        product_name: impl Into<String>,
        car_type: impl Into<CarType>,
        quantity: u32,
    ) -> Self {
        Self::new(product_id, product_name, car_type, Action::Add, quantity)
    }

    pub fn increase(
        product_id: impl Into<ProductId>,
        product_name: impl Into<String>,
        car_type: impl Into<CarType>,
        quantity: u32,
    ) -> Self {
        Self::new(product_id, product_name, car_type, Action::Increase, quantity)
    }

    pub fn decrease(product_id: impl Into<ProductId>, car_type: impl Into<CarType>) -> Self {
        Self::new(product_id, String::new(), car_type, Action::Decrease, 1)
    }

    pub fn set_quantity(
        product_id: impl Into<ProductId>,
        product_name: impl Into<String>,
        car_type: impl Into<CarType>,
        quantity: u32,
    ) -> Self {
        Self::new(product_id, product_name, car_type, Action::SetQuantity, quantity)
    }

    pub fn remove(product_id: impl Into<ProductId>, car_type: impl Into<CarType>) -> Self {
        Self::new(product_id, String::new(), car_type, Action::Remove, 1)
    }

    fn validate(&self) -> Result<(), LedgerError> {
        if self.product_id.is_blank() {
            return Err(LedgerError::InvalidMutation("product id is empty".to_string()));
        }
        if self.car_type.as_str().trim().is_empty() {
            return Err(LedgerError::InvalidMutation("car type is empty".to_string()));
        }
        match self.action {
            Action::Add | Action::Increase if self.quantity == 0 => Err(LedgerError::InvalidMutation(
                format!("{} needs a quantity of at least 1", self.action),
            )),
            Action::Add | Action::Increase | Action::SetQuantity
                if self.quantity > MAX_QUANTITY_PER_CAR_TYPE =>
            {
                Err(LedgerError::QuantityExceedsLimit(
                    u64::from(self.quantity),
                    MAX_QUANTITY_PER_CAR_TYPE,
                ))
            }
            _ => Ok(()),
        }
    }

    fn name_for(&self, existing: Option<&str>) -> String {
        if !self.product_name.trim().is_empty() {
            return self.product_name.clone();
        }
        match existing {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => self.product_id.fallback_name(),
        }
    }
}

/// Outcome of a mutation, as seen from the affected entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub product_id: ProductId,
    pub car_type: CarType,
    pub action: Action,
    /// Quantity before the mutation, 0 when the entry was absent.
    pub before: u32,
    /// Quantity after the mutation, 0 when the entry is gone.
    pub after: u32,
    /// Distinct car types left on the product.
    pub remaining_types: usize,
}

impl Change {
    /// Whether the entry's quantity changed.
    pub fn is_noop(&self) -> bool {
        self.before == self.after
    }

    /// Signed change in quantity.
    pub fn delta(&self) -> i64 {
        i64::from(self.after) - i64::from(self.before)
    }

    /// The entry existed before and is gone now.
    pub fn entry_removed(&self) -> bool {
        self.before > 0 && self.after == 0
    }

    /// The product has no selections left.
    pub fn product_removed(&self) -> bool {
        self.remaining_types == 0
    }
}

impl Ledger {
    /// Apply a mutation in place.
    ///
    /// On error the ledger is left untouched.
    pub fn apply(&mut self, mutation: &Mutation) -> Result<Change, LedgerError> {
        mutation.validate()?;

        let car_type = mutation.car_type.as_str();
        let index = self.product_index(&mutation.product_id);
        let before = index
            .and_then(|i| self.product_details[i].entry(car_type))
            .map(|e| e.quantity)
            .unwrap_or(0);

        let after = match mutation.action {
            Action::Add | Action::Increase => {
                let after = before.checked_add(mutation.quantity).ok_or(LedgerError::Overflow)?;
                if after > MAX_QUANTITY_PER_CAR_TYPE {
                    return Err(LedgerError::QuantityExceedsLimit(
                        u64::from(after),
                        MAX_QUANTITY_PER_CAR_TYPE,
                    ));
                }
                after
            }
            Action::Decrease => before.saturating_sub(1),
            Action::SetQuantity => mutation.quantity,
            Action::Remove => 0,
        };

        if after > 0 {
            self.upsert(index, mutation, after);
        } else if let Some(i) = index {
            let product = &mut self.product_details[i];
            product.car_types.retain(|e| e.car_type.as_str() != car_type);
            if product.car_types.is_empty() {
                self.product_details.remove(i);
            } else if mutation.action == Action::SetQuantity {
                product.product_name = mutation.name_for(Some(&product.product_name));
            }
        }

        Ok(Change {
            product_id: mutation.product_id.clone(),
            car_type: mutation.car_type.clone(),
            action: mutation.action,
            before,
            after,
            remaining_types: self.car_type_count(&mutation.product_id),
        })
    }

    fn upsert(&mut self, index: Option<usize>, mutation: &Mutation, quantity: u32) {
        let refresh_name = mutation.action != Action::Decrease;
        let product = match index {
            Some(i) => &mut self.product_details[i],
            None => {
                self.product_details.push(ProductEntry::empty(
                    mutation.product_id.clone(),
                    mutation.name_for(None),
                ));
                let last = self.product_details.len() - 1;
                &mut self.product_details[last]
            }
        };

        if refresh_name {
            product.product_name = mutation.name_for(Some(&product.product_name));
        }
        match product.car_types.iter_mut().find(|e| e.car_type == mutation.car_type) {
            Some(entry) => entry.quantity = quantity,
            None => product
                .car_types
                .push(CarTypeEntry::new(mutation.car_type.clone(), quantity)),
        }
    }
}

/// Pure form of [`Ledger::apply`]: consume a ledger, return the mutated one.
pub fn apply(mut ledger: Ledger, mutation: &Mutation) -> Result<Ledger, LedgerError> {
    ledger.apply(mutation)?;
    Ok(ledger)
}
