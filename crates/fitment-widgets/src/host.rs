//! Page host: owns the store, the cart bridge and every display, and
//! fans events out to the displays that listen for them.

use fitment_ledger::{summary_text, vehicle_labels, CarType, Change, ProductId};
use fitment_lookup::LookupApi;
use fitment_observability::StructuredLogger;
use fitment_store::{CookieJar, LedgerStore};

use crate::bridge::{plan_line_update, CartLineBridge, LineUpdate};
use crate::display::{Control, ControlOutcome, DisplayConfig, DisplayWidget};
use crate::events::{EventBus, WidgetEvent};
use crate::names::{resolve_product_name, ProductNameSource};
use crate::selector::{SelectorWidget, Submission};
use crate::WidgetError;

/// Handle to a mounted display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayHandle(usize);

pub struct Host<J, B> {
    store: LedgerStore<J>,
    bridge: B,
    displays: Vec<DisplayWidget>,
    bus: EventBus,
    logger: StructuredLogger,
}

impl<J: CookieJar, B: CartLineBridge> Host<J, B> {
    pub fn new(store: LedgerStore<J>, bridge: B, logger: StructuredLogger) -> Self {
        Self {
            store,
            bridge,
            displays: Vec::new(),
            bus: EventBus::new(),
            logger: logger.child("host"),
        }
    }

    pub fn store(&self) -> &LedgerStore<J> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut LedgerStore<J> {
        &mut self.store
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn events(&self) -> &EventBus {
        &self.bus
    }

    /// Mount a display and render it.
    pub fn mount(&mut self, config: DisplayConfig) -> DisplayHandle {
        let mut display = DisplayWidget::new(config, self.logger.clone());
        display.refresh(&self.store);
        self.displays.push(display);
        DisplayHandle(self.displays.len() - 1)
    }

    pub fn display(&self, handle: DisplayHandle) -> Option<&DisplayWidget> {
        self.displays.get(handle.0)
    }

    /// Dispatch an event and deliver everything pending.
    pub fn publish(&mut self, event: WidgetEvent) {
        self.bus.dispatch(event);
        while let Some(event) = self.bus.next() {
            let mut refreshed = 0;
            for display in self.displays.iter_mut().filter(|d| d.handles(event.kind)) {
                display.refresh(&self.store);
                refreshed += 1;
            }
            self.logger
                .debug_builder("event delivered")
                .field("event", event.kind.name())
                .field_i64("displays", refreshed)
                .emit();
        }
    }

    /// Submit the selector's vehicle for a product and notify the displays.
    pub fn submit<L: LookupApi>(
        &mut self,
        selector: &SelectorWidget<L>,
        product_id: ProductId,
        page: &dyn ProductNameSource,
        quantity_input: Option<&str>,
    ) -> Result<Submission, WidgetError> {
        let ledger = self.store.load()?;
        let name = resolve_product_name(page, &ledger, &product_id);
        let submission = selector.submit(&mut self.store, product_id, &name, quantity_input)?;
        self.publish(submission.event.clone());
        Ok(submission)
    }

    /// Handle a row control on a mounted display.
    pub fn control(
        &mut self,
        handle: DisplayHandle,
        car_type: &CarType,
        control: Control,
    ) -> Result<ControlOutcome, WidgetError> {
        let display = self
            .displays
            .get_mut(handle.0)
            .ok_or(WidgetError::UnknownDisplay(handle.0))?;
        let outcome = display.handle_control(&mut self.store, car_type, control)?;

        if let Some(change) = &outcome.change {
            self.sync_cart_line(change);
        }
        if let Some(event) = &outcome.event {
            self.publish(event.clone());
        }
        Ok(outcome)
    }

    /// Push a ledger change to the product's cart line.
    ///
    /// Bridge failures are logged, never returned.
    pub fn sync_cart_line(&mut self, change: &Change) -> Option<LineUpdate> {
        let Some(line) = self.bridge.line_for(&change.product_id) else {
            self.logger
                .debug_builder("no cart line for product")
                .field("product_id", change.product_id.as_str())
                .emit();
            return None;
        };
        let update = plan_line_update(change, line)?;
        match self
            .bridge
            .update_quantity(update.line, update.quantity, update.hint)
        {
            Ok(()) => Some(update),
            Err(e) => {
                self.logger
                    .warn_builder("cart line update failed")
                    .field("product_id", update.product_id.as_str())
                    .field_i64("line", update.line as i64)
                    .field_display("error", &e)
                    .emit();
                None
            }
        }
    }

    /// The host removed a cart line: drop the product's selections.
    pub fn remove_cart_line(&mut self, product_id: &ProductId) -> Result<Vec<Change>, WidgetError> {
        let changes = self.store.remove_product(product_id)?;
        for change in &changes {
            self.publish(WidgetEvent::removed(
                change.product_id.clone(),
                change.car_type.clone(),
            ));
        }
        Ok(changes)
    }

    /// Order-note summary; empty when no ledger cookie exists.
    pub fn summary_text(&self) -> Result<String, WidgetError> {
        if !self.store.has_ledger()? {
            return Ok(String::new());
        }
        Ok(summary_text(&self.store.load()?))
    }

    /// Raw ledger cookie for the hidden form field; empty when absent.
    pub fn raw_mirror(&self) -> Result<String, WidgetError> {
        Ok(self.store.load_raw()?.unwrap_or_default())
    }

    /// Vehicles listed under a cart line; empty unless the ledger belongs
    /// to the current cart.
    pub fn vehicle_labels(&self, product_id: &ProductId) -> Result<Vec<String>, WidgetError> {
        let Some(session) = self.store.session_cart_id()? else {
            return Ok(Vec::new());
        };
        let ledger = self.store.load()?;
        Ok(vehicle_labels(&ledger, &session, product_id)
            .into_iter()
            .map(|c| c.to_string())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{MemoryCart, QuantityHint};
    use crate::events::EventKind;
    use fitment_ledger::Mutation;
    use fitment_store::{CookieSettings, MemoryJar};

    fn host(header: &str, cart: MemoryCart) -> Host<MemoryJar, MemoryCart> {
        let logger = StructuredLogger::new("test");
        let store = LedgerStore::new(MemoryJar::from_header(header), CookieSettings::default(), logger.clone());
        Host::new(store, cart, logger)
    }

    #[test]
    fn test_publish_refreshes_listeners_only() {
        let mut host = host("cart=c1", MemoryCart::new());
        let page = host.mount(DisplayConfig::product_page("P1"));
        let mut quiet = DisplayConfig::cart_line("P1");
        quiet.events = vec![EventKind::DrawerOpen];
        let drawer = host.mount(quiet);

        host.store_mut()
            .mutate(&Mutation::add("P1", "Mats", "SUV", 1))
            .unwrap();
        host.publish(WidgetEvent::added(ProductId::new("P1"), CarType::new("SUV"), 1));

        assert_eq!(host.display(page).unwrap().view().rows.len(), 1);
        assert!(host.display(drawer).unwrap().view().is_empty());

        host.publish(WidgetEvent::bare(EventKind::DrawerOpen));
        assert_eq!(host.display(drawer).unwrap().view().rows.len(), 1);
        assert_eq!(host.events().history().len(), 2);
    }

    #[test]
    fn test_control_syncs_cart_line() {
        let mut host = host("cart=c1", MemoryCart::new().with_line("P1", 3));
        host.store_mut().mutate(&Mutation::add("P1", "Mats", "SUV", 2)).unwrap();
        host.store_mut().mutate(&Mutation::add("P1", "Mats", "Van", 1)).unwrap();
        let line = host.mount(DisplayConfig::cart_line("P1"));

        host.control(line, &CarType::new("SUV"), Control::Increase).unwrap();
        assert_eq!(host.bridge().quantity(&ProductId::new("P1")), Some(4));
        assert_eq!(host.bridge().updates()[0].hint, Some(QuantityHint::Plus));

        host.control(line, &CarType::new("SUV"), Control::Remove).unwrap();
        assert_eq!(host.bridge().quantity(&ProductId::new("P1")), Some(1));

        host.control(line, &CarType::new("Van"), Control::Remove).unwrap();
        assert_eq!(host.bridge().quantity(&ProductId::new("P1")), None);
        assert_eq!(host.bridge().updates().last().unwrap().quantity, 0);
        assert!(host.display(line).unwrap().view().is_empty());
    }

    #[test]
    fn test_control_without_cart_line() {
        let mut host = host("cart=c1", MemoryCart::new());
        host.store_mut().mutate(&Mutation::add("P1", "Mats", "SUV", 1)).unwrap();
        let line = host.mount(DisplayConfig::cart_line("P1"));
        let outcome = host.control(line, &CarType::new("SUV"), Control::Increase).unwrap();
        assert!(outcome.change.is_some());
        assert!(host.bridge().updates().is_empty());
    }

    #[test]
    fn test_unknown_display() {
        let mut host = host("cart=c1", MemoryCart::new());
        assert!(matches!(
            host.control(DisplayHandle(4), &CarType::new("SUV"), Control::Remove),
            Err(WidgetError::UnknownDisplay(4))
        ));
    }

    #[test]
    fn test_summary_and_mirror() {
        let mut host = host("cart=c1", MemoryCart::new());
        assert_eq!(host.summary_text().unwrap(), "");
        assert_eq!(host.raw_mirror().unwrap(), "");

        host.store_mut().mutate(&Mutation::add("P1", "Mats", "SUV", 2)).unwrap();
        assert_eq!(
            host.summary_text().unwrap(),
            "Product: Mats\nSelected Car Types:\n  - SUV: 2\n"
        );
        assert!(host.raw_mirror().unwrap().starts_with(r#"{"cart_id":"c1""#));
    }

    #[test]
    fn test_vehicle_labels_require_matching_cart() {
        let stale = host(
            r#"cart=c2; cart_details={"cart_id":"c1","product_details":[{"product_id":"P1","product_name":"Mats","car_types":["SUV"]}]}"#,
            MemoryCart::new(),
        );
        assert!(stale.vehicle_labels(&ProductId::new("P1")).unwrap().is_empty());

        let current = host(
            r#"cart=c1; cart_details={"cart_id":"c1","product_details":[{"product_id":"P1","product_name":"Mats","car_types":["SUV"]}]}"#,
            MemoryCart::new(),
        );
        assert_eq!(current.vehicle_labels(&ProductId::new("P1")).unwrap(), vec!["SUV"]);
    }

    #[test]
    fn test_remove_cart_line_cascade() {
        let mut host = host("cart=c1", MemoryCart::new());
        host.store_mut().mutate(&Mutation::add("P1", "Mats", "SUV", 2)).unwrap();
        host.store_mut().mutate(&Mutation::add("P1", "Mats", "Van", 1)).unwrap();
        let display = host.mount(DisplayConfig::cart_line("P1"));

        let changes = host.remove_cart_line(&ProductId::new("P1")).unwrap();
        assert_eq!(changes.len(), 2);
        assert!(host.display(display).unwrap().view().is_empty());
        assert!(host
            .events()
            .history()
            .iter()
            .all(|e| e.kind == EventKind::CarTypeRemoved));
    }
}
