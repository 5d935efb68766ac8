//! Ledger persistence on top of a cookie jar.

use fitment_ledger::{CartId, Change, Ledger, Mutation, ProductId};
use fitment_observability::StructuredLogger;
use serde::{Deserialize, Serialize};

use crate::cart_id::fallback_cart_id;
use crate::cookie::Cookie;
use crate::jar::CookieJar;
use crate::StoreError;

/// Cookie names and lifetime used by the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CookieSettings {
    /// Session cart id, owned by the host cart.
    pub cart_cookie: String,
    /// JSON ledger.
    pub ledger_cookie: String,
    pub ttl_days: u32,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            cart_cookie: "cart".to_string(),
            ledger_cookie: "cart_details".to_string(),
            ttl_days: 31,
        }
    }
}

/// Reads, mutates and writes the ledger cookie.
///
/// Every mutation is a full read-modify-write cycle against the jar; there
/// is no caching between calls, so two stores over the same jar always see
/// each other's writes.
///
/// # Example
///
/// ```rust
/// use fitment_ledger::{Mutation, ProductId};
/// use fitment_observability::StructuredLogger;
/// use fitment_store::{CookieSettings, LedgerStore, MemoryJar};
///
/// let mut store = LedgerStore::new(
///     MemoryJar::from_header("cart=c1"),
///     CookieSettings::default(),
///     StructuredLogger::new("doc"),
/// );
/// let (ledger, _) = store.mutate(&Mutation::add("P1", "Mats", "SUV", 2)).unwrap();
/// assert_eq!(ledger.cart_id().as_str(), "c1");
/// assert_eq!(store.load().unwrap().quantity(&ProductId::new("P1"), "SUV"), 2);
/// ```
pub struct LedgerStore<J> {
    jar: J,
    settings: CookieSettings,
    logger: StructuredLogger,
}

impl<J: CookieJar> LedgerStore<J> {
    pub fn new(jar: J, settings: CookieSettings, logger: StructuredLogger) -> Self {
        Self {
            jar,
            settings,
            logger: logger.child("ledger-store"),
        }
    }

    pub fn settings(&self) -> &CookieSettings {
        &self.settings
    }

    pub fn jar(&self) -> &J {
        &self.jar
    }

    pub fn jar_mut(&mut self) -> &mut J {
        &mut self.jar
    }

    pub fn into_inner(self) -> J {
        self.jar
    }

    /// Cart id from the session cookie; blank values count as absent.
    pub fn session_cart_id(&self) -> Result<Option<CartId>, StoreError> {
        Ok(self
            .jar
            .get(&self.settings.cart_cookie)?
            .map(CartId::new)
            .filter(|id| !id.is_blank()))
    }

    /// Session cart id, minting and persisting a temporary one when absent.
    pub fn ensure_cart_id(&mut self) -> Result<CartId, StoreError> {
        if let Some(id) = self.session_cart_id()? {
            return Ok(id);
        }
        let id = fallback_cart_id();
        self.logger
            .warn_builder("no cart cookie; using temporary cart id")
            .field("cookie", self.settings.cart_cookie.as_str())
            .field("cart_id", id.as_str())
            .emit();
        self.jar.set(Cookie::with_ttl_days(
            self.settings.cart_cookie.as_str(),
            id.as_str(),
            self.settings.ttl_days,
        ))?;
        Ok(id)
    }

    /// Raw ledger cookie text, for mirroring into a form field.
    pub fn load_raw(&self) -> Result<Option<String>, StoreError> {
        self.jar.get(&self.settings.ledger_cookie)
    }

    /// Whether a ledger cookie is present at all.
    pub fn has_ledger(&self) -> Result<bool, StoreError> {
        self.jar.exists(&self.settings.ledger_cookie)
    }

    /// Load the ledger.
    ///
    /// A missing or unreadable cookie yields an empty ledger bound to the
    /// session cart id. Only jar failures are errors.
    pub fn load(&self) -> Result<Ledger, StoreError> {
        let Some(raw) = self.load_raw()? else {
            return Ok(Ledger::new(self.session_cart_id()?.unwrap_or_default()));
        };
        match Ledger::from_json(&raw) {
            Ok(ledger) => Ok(ledger),
            Err(e) => {
                self.logger
                    .warn_builder("ledger cookie unreadable; starting empty")
                    .field("cookie", self.settings.ledger_cookie.as_str())
                    .field_i64("length", raw.len() as i64)
                    .field_display("error", &e)
                    .emit();
                Ok(Ledger::new(self.session_cart_id()?.unwrap_or_default()))
            }
        }
    }

    /// Persist the ledger with the configured lifetime.
    pub fn save(&mut self, ledger: &Ledger) -> Result<(), StoreError> {
        let json = ledger.to_json()?;
        self.jar.set(Cookie::with_ttl_days(
            self.settings.ledger_cookie.as_str(),
            json,
            self.settings.ttl_days,
        ))
    }

    /// Load, bind to the session cart, apply one mutation and save.
    ///
    /// A rejected mutation writes nothing.
    pub fn mutate(&mut self, mutation: &Mutation) -> Result<(Ledger, Change), StoreError> {
        let cart_id = self.ensure_cart_id()?;
        let mut ledger = self.load()?;
        if ledger.sync_cart_id(&cart_id) {
            self.logger
                .debug_builder("ledger rebound to session cart")
                .field("cart_id", cart_id.as_str())
                .emit();
        }
        let change = ledger.apply(mutation)?;
        self.save(&ledger)?;

        self.logger
            .debug_builder("ledger mutated")
            .field("product_id", change.product_id.as_str())
            .field("car_type", change.car_type.as_str())
            .field("action", change.action.as_str())
            .field_i64("before", i64::from(change.before))
            .field_i64("after", i64::from(change.after))
            .emit();
        Ok((ledger, change))
    }

    /// Drop every selection for a product, e.g. when its cart line is removed.
    ///
    /// Returns one change per removed car type; nothing is written when the
    /// product has no selections.
    pub fn remove_product(&mut self, product_id: &ProductId) -> Result<Vec<Change>, StoreError> {
        let ledger = self.load()?;
        let Some(product) = ledger.product(product_id) else {
            return Ok(Vec::new());
        };
        let car_types: Vec<_> = product.car_types.iter().map(|e| e.car_type.clone()).collect();

        let cart_id = self.ensure_cart_id()?;
        let mut ledger = ledger;
        ledger.sync_cart_id(&cart_id);
        let mut changes = Vec::with_capacity(car_types.len());
        for car_type in car_types {
            changes.push(ledger.apply(&Mutation::remove(product_id.clone(), car_type))?);
        }
        self.save(&ledger)?;

        self.logger
            .info_builder("product selections cleared")
            .field("product_id", product_id.as_str())
            .field_i64("removed", changes.len() as i64)
            .emit();
        Ok(changes)
    }
}
