//! Page-level notification events and their queue.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use fitment_ledger::{Action, CarType, ProductId};
use serde::{Deserialize, Serialize};

/// Events the widgets publish or listen to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "carTypeAdded")]
    CarTypeAdded,
    #[serde(rename = "carTypeRemoved")]
    CarTypeRemoved,
    #[serde(rename = "carTypeUpdated")]
    CarTypeUpdated,
    /// The host cart re-rendered.
    #[serde(rename = "cart:refresh")]
    CartRefresh,
    /// The host cart gained an item.
    #[serde(rename = "cart:added")]
    CartAdded,
    /// The cart drawer opened.
    #[serde(rename = "drawerOpen")]
    DrawerOpen,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        Self::CarTypeAdded,
        Self::CarTypeRemoved,
        Self::CarTypeUpdated,
        Self::CartRefresh,
        Self::CartAdded,
        Self::DrawerOpen,
    ];

    /// DOM event name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CarTypeAdded => "carTypeAdded",
            Self::CarTypeRemoved => "carTypeRemoved",
            Self::CarTypeUpdated => "carTypeUpdated",
            Self::CartRefresh => "cart:refresh",
            Self::CartAdded => "cart:added",
            Self::DrawerOpen => "drawerOpen",
        }
    }

    /// Whether the event is raised by a ledger mutation.
    pub fn is_ledger_change(&self) -> bool {
        matches!(self, Self::CarTypeAdded | Self::CarTypeRemoved | Self::CarTypeUpdated)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown event: {0}")]
pub struct UnknownEvent(String);

impl FromStr for EventKind {
    type Err = UnknownEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownEvent(s.to_string()))
    }
}

/// Event payload, serialised like the `CustomEvent` detail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car_type: Option<CarType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
}

/// A dispatched event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetEvent {
    pub kind: EventKind,
    pub detail: EventDetail,
}

impl WidgetEvent {
    /// Event without a payload, e.g. `cart:refresh`.
    pub fn bare(kind: EventKind) -> Self {
        Self {
            kind,
            detail: EventDetail::default(),
        }
    }

    pub fn added(product_id: ProductId, car_type: CarType, quantity: u32) -> Self {
        Self {
            kind: EventKind::CarTypeAdded,
            detail: EventDetail {
                product_id: Some(product_id),
                car_type: Some(car_type),
                quantity: Some(quantity),
                action: Some(Action::Add),
            },
        }
    }

    pub fn updated(product_id: ProductId, car_type: CarType, quantity: u32, action: Action) -> Self {
        Self {
            kind: EventKind::CarTypeUpdated,
            detail: EventDetail {
                product_id: Some(product_id),
                car_type: Some(car_type),
                quantity: Some(quantity),
                action: Some(action),
            },
        }
    }

    pub fn removed(product_id: ProductId, car_type: CarType) -> Self {
        Self {
            kind: EventKind::CarTypeRemoved,
            detail: EventDetail {
                product_id: Some(product_id),
                car_type: Some(car_type),
                quantity: None,
                action: Some(Action::Remove),
            },
        }
    }
}

/// Number of delivered events an [`EventBus`] remembers.
pub const HISTORY_LIMIT: usize = 64;

/// FIFO of events waiting to be delivered, plus the most recent
/// [`HISTORY_LIMIT`] delivered ones.
#[derive(Debug, Default)]
pub struct EventBus {
    pending: VecDeque<WidgetEvent>,
    delivered: VecDeque<WidgetEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&mut self, event: WidgetEvent) {
        self.pending.push_back(event);
    }

    /// Take the next event; it is recorded as delivered.
    pub fn next(&mut self) -> Option<WidgetEvent> {
        let event = self.pending.pop_front()?;
        if self.delivered.len() == HISTORY_LIMIT {
            self.delivered.pop_front();
        }
        self.delivered.push_back(event.clone());
        Some(event)
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Recently delivered events, oldest first.
    pub fn history(&self) -> &VecDeque<WidgetEvent> {
        &self.delivered
    }
}
