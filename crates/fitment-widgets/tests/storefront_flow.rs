//! Selector → ledger → display → cart bridge, end to end with in-memory ports.

use std::sync::Arc;

use fitment_ledger::{CarType, ProductId};
use fitment_lookup::StaticLookup;
use fitment_observability::{LogLevel, MemorySink, StructuredLogger};
use fitment_store::{CookieSettings, LedgerStore, MemoryJar};
use fitment_widgets::prelude::*;
use fitment_widgets::{QuantityHint, SelectorSettings, ThirdRowOption};

fn logger(sink: &MemorySink) -> StructuredLogger {
    StructuredLogger::new("storefront")
        .with_sink(Arc::new(sink.clone()))
        .with_min_level(LogLevel::Debug)
}

#[tokio::test]
async fn shopper_picks_two_vehicles_and_edits_them_in_the_cart() {
    let sink = MemorySink::new();
    let logger = logger(&sink);
    let lookup = StaticLookup::new()
        .vehicle("Toyota", "Highlander", "2021", 3)
        .vehicle("Honda", "Civic", "2019", 2);

    let store = LedgerStore::new(
        MemoryJar::from_header("cart=Z2NwLXVz"),
        CookieSettings::default(),
        logger.clone(),
    );
    let cart = MemoryCart::new().with_line("P1", 3);
    let mut host = Host::new(store, cart, logger.clone());
    let product_page = host.mount(DisplayConfig::product_page("P1"));
    let cart_line = host.mount(DisplayConfig::cart_line("P1"));

    let page = PageMeta {
        title: Some("All-Weather Floor Mats".to_string()),
        og_title: None,
    };
    let mut selector = SelectorWidget::new(lookup, &SelectorSettings::default(), true, logger);
    selector.connect().await;

    selector.select_make("Toyota").await;
    selector.select_model("Highlander").await;
    selector.select_year("2021").await;
    assert_eq!(selector.state().third_row, ThirdRowOption::Enabled);
    let submission = host
        .submit(&selector, ProductId::new("P1"), &page, Some("2"))
        .unwrap();
    assert!(submission.is_saved());
    assert_eq!(submission.event.kind, EventKind::CarTypeAdded);

    selector.select_make("Honda").await;
    selector.select_model("Civic").await;
    selector.select_year("2019").await;
    assert_eq!(selector.state().third_row, ThirdRowOption::Disabled);
    host.submit(&selector, ProductId::new("P1"), &page, None).unwrap();

    // both displays re-rendered from the cookie
    let view = host.display(product_page).unwrap().view();
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.row("Toyota Highlander 2021").unwrap().quantity, 2);
    assert_eq!(host.display(cart_line).unwrap().view().rows.len(), 2);

    let ledger = host.store().load().unwrap();
    assert_eq!(
        ledger.product(&ProductId::new("P1")).unwrap().product_name,
        "All-Weather Floor Mats"
    );
    assert_eq!(ledger.cart_id().as_str(), "Z2NwLXVz");

    // edit in the cart
    let civic = CarType::new("Honda Civic 2019");
    host.control(cart_line, &civic, Control::Increase).unwrap();
    assert_eq!(host.bridge().quantity(&ProductId::new("P1")), Some(4));

    host.control(cart_line, &civic, Control::Set("oops".to_string())).unwrap();
    assert_eq!(host.store().load().unwrap().quantity(&ProductId::new("P1"), "Honda Civic 2019"), 2);

    host.control(cart_line, &civic, Control::Remove).unwrap();
    let last = host.bridge().updates().last().unwrap().clone();
    assert_eq!((last.quantity, last.hint), (2, Some(QuantityHint::Minus)));

    host.control(cart_line, &CarType::new("Toyota Highlander 2021"), Control::Remove)
        .unwrap();
    assert_eq!(host.bridge().quantity(&ProductId::new("P1")), None);
    assert!(host.display(product_page).unwrap().view().is_empty());
    assert_eq!(host.summary_text().unwrap(), "No car types selected yet.");

    let kinds: Vec<EventKind> = host.events().history().iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::CarTypeAdded,
            EventKind::CarTypeAdded,
            EventKind::CarTypeUpdated,
            EventKind::CarTypeRemoved,
            EventKind::CarTypeRemoved,
        ]
    );
    assert!(sink.contains("selection recorded"));
}

#[tokio::test]
async fn malformed_cookie_degrades_to_empty_ledger() {
    let sink = MemorySink::new();
    let logger = logger(&sink);
    let store = LedgerStore::new(
        MemoryJar::from_header("cart=c1; cart_details={broken"),
        CookieSettings::default(),
        logger.clone(),
    );
    let mut host = Host::new(store, MemoryCart::new(), logger.clone());
    let display = host.mount(DisplayConfig::cart_line("P1"));
    assert!(host.display(display).unwrap().view().is_empty());

    let mut selector = SelectorWidget::new(
        StaticLookup::new().vehicle("Ford", "F-150", "2020", 2),
        &SelectorSettings::default(),
        false,
        logger,
    );
    selector.select_make("Ford").await;
    selector.select_model("F-150").await;
    selector.select_year("2020").await;
    host.submit(&selector, ProductId::new("P1"), &PageMeta::default(), None)
        .unwrap();

    let ledger = host.store().load().unwrap();
    assert_eq!(ledger.quantity(&ProductId::new("P1"), "Ford F-150 2020"), 1);
    assert_eq!(ledger.product(&ProductId::new("P1")).unwrap().product_name, "Product P1");
    assert!(sink.at_least(LogLevel::Warn).iter().any(|e| e.message.contains("unreadable")));
}
