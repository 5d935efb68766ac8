//! Cookie persistence for the vehicle-fitment ledger.
//!
//! The storefront keeps two cookies: `cart`, the host cart's session id, and
//! `cart_details`, the JSON ledger. This crate provides the cookie jar port,
//! the `document.cookie` text codec and [`LedgerStore`], which turns the jar
//! into load / mutate / save operations on a [`fitment_ledger::Ledger`].
//!
//! # Example
//!
//! ```rust
//! use fitment_ledger::Mutation;
//! use fitment_observability::StructuredLogger;
//! use fitment_store::prelude::*;
//!
//! let mut store = LedgerStore::new(MemoryJar::new(), CookieSettings::default(), StructuredLogger::new("doc"));
//! let (ledger, change) = store.mutate(&Mutation::add("P1", "Mats", "SUV", 1)).unwrap();
//! assert!(ledger.cart_id().is_temporary());
//! assert_eq!(change.after, 1);
//! ```

mod cart_id;
mod cookie;
mod error;
mod jar;
mod ledger_store;

pub use cart_id::fallback_cart_id;
pub use cookie::{cookie_from_header, decode_value, encode_value, parse_cookie_header, Cookie};
pub use error::StoreError;
pub use jar::{CookieJar, FileJar, HeaderJar, MemoryJar};
pub use ledger_store::{CookieSettings, LedgerStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cookie, CookieJar, CookieSettings, FileJar, LedgerStore, MemoryJar, StoreError};
}
