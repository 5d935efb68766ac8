//! Widget error types.

use fitment_ledger::LedgerError;
use fitment_lookup::LookupError;
use fitment_store::StoreError;
use thiserror::Error;

/// Errors surfaced by the widgets.
///
/// Lookup and cookie-parse failures are normally absorbed and logged by the
/// widgets; these variants reach callers only from explicit operations.
#[derive(Error, Debug)]
pub enum WidgetError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Submit pressed before make, model and year were chosen.
    #[error("Selection incomplete: {0}")]
    SelectionIncomplete(String),

    /// The display has no product to act on.
    #[error("Display is not bound to a product")]
    Unbound,

    /// No display with that handle.
    #[error("Unknown display: {0}")]
    UnknownDisplay(usize),

    /// The host cart rejected a line update.
    #[error("Cart bridge error: {0}")]
    Bridge(String),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}
