//! Newtype identifiers.
//!
//! Product ids come from the storefront and cart ids from the host cart
//! session; both are opaque strings. Keeping them apart stops a cart id from
//! being looked up as a product.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix of cart ids minted locally when the session has none yet.
pub const TEMPORARY_CART_PREFIX: &str = "temp_";

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// True when the id is empty or only whitespace.
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Storefront product id, kept as a string even when the page has a number.
    ProductId
);
string_id!(
    /// Host cart session id, the value of the `cart` cookie.
    CartId
);

impl ProductId {
    /// Display name used when the storefront gives no product title.
    pub fn fallback_name(&self) -> String {
        format!("Product {}", self.0)
    }
}

impl CartId {
    /// Build a locally minted cart id: `temp_<unix-millis>_<nonce>`.
    pub fn temporary(unix_millis: u128, nonce: u32) -> Self {
        Self(format!("{}{}_{}", TEMPORARY_CART_PREFIX, unix_millis, nonce))
    }

    /// Whether this id was minted locally rather than issued by the cart.
    pub fn is_temporary(&self) -> bool {
        self.0.starts_with(TEMPORARY_CART_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("8043712");
        assert_eq!(id.as_str(), "8043712");
        assert!(!id.is_blank());
        assert!(ProductId::new("  ").is_blank());
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = CartId::new("c1-abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""c1-abc""#);
    }

    #[test]
    fn test_fallback_name() {
        assert_eq!(ProductId::new("42").fallback_name(), "Product 42");
    }

    #[test]
    fn test_temporary_cart_id() {
        let id = CartId::temporary(1_700_000_000_123, 987_654);
        assert_eq!(id.as_str(), "temp_1700000000123_987654");
        assert!(id.is_temporary());
        assert!(!CartId::new("Z2NwLXVzLWVhc3Qx").is_temporary());
    }
}
