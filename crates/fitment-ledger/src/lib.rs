//! Vehicle-fitment selection ledger.
//!
//! Shoppers pick one or more vehicles ("car types") for a product before it
//! goes into the cart. The ledger records those picks per product with a
//! quantity each, and is persisted by the storefront as a single JSON cookie.
//!
//! - **Ledger**: products, car-type entries, invariants
//! - **Mutations**: add / increase / decrease / set quantity / remove
//! - **Summary**: text projections for order notes and cart lines
//!
//! # Example
//!
//! ```rust
//! use fitment_ledger::prelude::*;
//!
//! let ledger = Ledger::new(CartId::new("c1"));
//! let ledger = apply(ledger, &Mutation::add("P1", "Floor Mats", "Toyota Camry 2021", 1)).unwrap();
//! let ledger = apply(ledger, &Mutation::increase("P1", "Floor Mats", "Toyota Camry 2021", 2)).unwrap();
//! assert_eq!(ledger.quantity(&ProductId::new("P1"), "Toyota Camry 2021"), 3);
//! ```

pub mod error;
pub mod ids;
pub mod ledger;
pub mod summary;

pub use error::LedgerError;
pub use ids::*;
pub use ledger::{
    apply, Action, CarType, CarTypeEntry, Change, Ledger, Mutation, ProductEntry,
    MAX_QUANTITY_PER_CAR_TYPE,
};
pub use summary::{summary_text, vehicle_labels, PRODUCT_SEPARATOR};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::LedgerError;
    pub use crate::ids::*;
    pub use crate::ledger::{
        apply, Action, CarType, CarTypeEntry, Change, Ledger, Mutation, ProductEntry,
        MAX_QUANTITY_PER_CAR_TYPE,
    };
    pub use crate::summary::{summary_text, vehicle_labels};
}
