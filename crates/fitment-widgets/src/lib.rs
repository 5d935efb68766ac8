//! Storefront widgets for vehicle-fitment selections.
//!
//! - **Selector**: cascading make → model → year lookup, submits a car type
//! - **Display**: one product's car types with quantity controls
//! - **Host**: event fan-out to displays, cart line sync, summaries
//!
//! The DOM is reached only through ports: [`fitment_store::CookieJar`] for
//! cookies, [`fitment_lookup::LookupApi`] for the lookup API,
//! [`CartLineBridge`] for the host cart and [`ProductNameSource`] for page
//! metadata.

pub mod bridge;
pub mod config;
pub mod display;
mod error;
pub mod events;
pub mod host;
pub mod names;
pub mod selector;

pub use bridge::{plan_line_update, CartLine, CartLineBridge, LineUpdate, MemoryCart, QuantityHint};
pub use config::{FitmentConfig, SelectorSettings, THIRD_ROW_OPTION};
pub use display::{escape_html, Control, ControlOutcome, ControlStyle, DisplayConfig, DisplayView, DisplayWidget};
pub use error::WidgetError;
pub use events::{EventBus, EventDetail, EventKind, WidgetEvent, HISTORY_LIMIT};
pub use host::{DisplayHandle, Host};
pub use names::{resolve_product_name, PageMeta, ProductNameSource};
pub use selector::{
    parse_quantity, Delivery, LookupTicket, SelectField, SelectorPhase, SelectorState,
    SelectorWidget, Submission, ThirdRowOption,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Control, DisplayConfig, EventKind, FitmentConfig, Host, MemoryCart, PageMeta,
        SelectorWidget, WidgetError, WidgetEvent,
    };
}
