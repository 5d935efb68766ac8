//! Car type display: one product's selections with quantity controls.

use fitment_ledger::{Action, CarType, Change, Ledger, Mutation, ProductId};
use fitment_observability::StructuredLogger;
use fitment_store::{CookieJar, LedgerStore};
use serde::{Deserialize, Serialize};

use crate::events::{EventKind, WidgetEvent};
use crate::WidgetError;

/// How quantities are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlStyle {
    /// Quantity as text, remove button only.
    ReadOnly,
    /// Minus / input / plus stepper and remove button.
    Stepper,
}

/// Settings for one display instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Product shown; `None` renders nothing.
    pub product_id: Option<ProductId>,
    pub heading: String,
    pub empty_message: String,
    pub style: ControlStyle,
    /// Events that trigger a re-render.
    pub events: Vec<EventKind>,
    pub min_quantity: u32,
}

impl DisplayConfig {
    /// Product page list: read-only quantities.
    pub fn product_page(product_id: impl Into<ProductId>) -> Self {
        Self {
            product_id: Some(product_id.into()),
            heading: "Selected Car Types".to_string(),
            empty_message: "No car types selected yet.".to_string(),
            style: ControlStyle::ReadOnly,
            events: vec![
                EventKind::CarTypeAdded,
                EventKind::CarTypeRemoved,
                EventKind::CartRefresh,
            ],
            min_quantity: 1,
        }
    }

    /// Cart line list: steppers, follows every cart event.
    pub fn cart_line(product_id: impl Into<ProductId>) -> Self {
        Self {
            product_id: Some(product_id.into()),
            heading: "Car Types".to_string(),
            empty_message: String::new(),
            style: ControlStyle::Stepper,
            events: EventKind::ALL.to_vec(),
            min_quantity: 1,
        }
    }

    pub fn listens_to(&self, kind: EventKind) -> bool {
        self.events.contains(&kind)
    }
}

/// One rendered car type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub car_type: CarType,
    pub quantity: u32,
    pub minus_enabled: bool,
    /// Element id of the quantity input.
    pub input_id: String,
}

/// Render output of a display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayView {
    pub product_id: Option<ProductId>,
    pub rows: Vec<DisplayRow>,
}

impl DisplayView {
    /// Project a product's entries out of the ledger.
    pub fn render(config: &DisplayConfig, ledger: &Ledger) -> Self {
        let Some(product_id) = config.product_id.clone() else {
            return Self::default();
        };
        let rows = ledger
            .product(&product_id)
            .map(|product| {
                product
                    .car_types
                    .iter()
                    .map(|entry| DisplayRow {
                        car_type: entry.car_type.clone(),
                        quantity: entry.quantity,
                        minus_enabled: entry.quantity > config.min_quantity,
                        input_id: format!("Quantity-{}-{}", product_id, entry.car_type.slug()),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self {
            product_id: Some(product_id),
            rows,
        }
    }

    pub fn row(&self, car_type: &str) -> Option<&DisplayRow> {
        self.rows.iter().find(|r| r.car_type.as_str() == car_type)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// HTML fragment; every interpolated value is escaped.
    pub fn to_html(&self, config: &DisplayConfig) -> String {
        let Some(product_id) = &self.product_id else {
            return String::new();
        };
        let pid = escape_html(product_id.as_str());
        let mut html = format!(r#"<div class="car-types-display" data-product-id="{}">"#, pid);

        if self.rows.is_empty() {
            if !config.empty_message.is_empty() {
                html.push_str(&format!(
                    r#"<p class="car-types-display__empty">{}</p>"#,
                    escape_html(&config.empty_message)
                ));
            }
            html.push_str("</div>");
            return html;
        }

        if !config.heading.is_empty() {
            html.push_str(&format!(
                r#"<h4 class="car-types-display__heading">{}</h4>"#,
                escape_html(&config.heading)
            ));
        }
        html.push_str(r#"<ul class="car-types-list">"#);
        for row in &self.rows {
            let ct = escape_html(row.car_type.as_str());
            html.push_str(&format!(r#"<li class="car-type-item" data-car-type="{}">"#, ct));
            html.push_str(&format!(r#"<span class="car-type-name">{}</span>"#, ct));
            match config.style {
                ControlStyle::ReadOnly => html.push_str(&format!(
                    r#"<span class="car-type-quantity">Qty: {}</span>"#,
                    row.quantity
                )),
                ControlStyle::Stepper => {
                    html.push_str(r#"<div class="car-type-quantity">"#);
                    html.push_str(&format!(
                        r#"<button type="button" name="minus" data-action="decrease" data-product-id="{}" data-car-type="{}"{}>-</button>"#,
                        pid,
                        ct,
                        if row.minus_enabled { "" } else { " disabled" }
                    ));
                    html.push_str(&format!(
                        r#"<input type="number" name="quantity" id="{}" min="{}" value="{}" data-product-id="{}" data-car-type="{}">"#,
                        escape_html(&row.input_id),
                        config.min_quantity,
                        row.quantity,
                        pid,
                        ct
                    ));
                    html.push_str(&format!(
                        r#"<button type="button" name="plus" data-action="increase" data-product-id="{}" data-car-type="{}">+</button>"#,
                        pid, ct
                    ));
                    html.push_str("</div>");
                }
            }
            html.push_str(&format!(
                r#"<button type="button" class="car-type-remove" data-action="remove" data-product-id="{}" data-car-type="{}" aria-label="Remove {}">&times;</button>"#,
                pid, ct, ct
            ));
            html.push_str("</li>");
        }
        html.push_str("</ul></div>");
        html
    }
}

/// Escape text for HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// A control activated on a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Increase,
    Decrease,
    /// Raw text of the quantity input.
    Set(String),
    Remove,
}

/// Result of handling a control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlOutcome {
    /// `None` when the control was rejected or did nothing.
    pub change: Option<Change>,
    pub event: Option<WidgetEvent>,
}

/// One display instance.
pub struct DisplayWidget {
    config: DisplayConfig,
    view: DisplayView,
    logger: StructuredLogger,
}

impl DisplayWidget {
    pub fn new(config: DisplayConfig, logger: StructuredLogger) -> Self {
        Self {
            config,
            view: DisplayView::default(),
            logger: logger.child("display"),
        }
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Last rendered view.
    pub fn view(&self) -> &DisplayView {
        &self.view
    }

    pub fn html(&self) -> String {
        self.view.to_html(&self.config)
    }

    /// Whether an event should trigger a re-render.
    pub fn handles(&self, kind: EventKind) -> bool {
        self.config.listens_to(kind)
    }

    /// Re-read the ledger and re-render.
    pub fn refresh<J: CookieJar>(&mut self, store: &LedgerStore<J>) -> &DisplayView {
        let ledger = match store.load() {
            Ok(ledger) => ledger,
            Err(e) => {
                self.logger
                    .warn_builder("could not read ledger; rendering empty")
                    .field_display("error", &e)
                    .emit();
                Ledger::default()
            }
        };
        self.view = DisplayView::render(&self.config, &ledger);
        &self.view
    }

    /// Apply a row control to the ledger and re-render.
    ///
    /// The returned event is for the caller to dispatch. Rejected input
    /// (minus at the minimum, a non-numeric or sub-minimum quantity)
    /// mutates nothing and restores the previous rendering.
    pub fn handle_control<J: CookieJar>(
        &mut self,
        store: &mut LedgerStore<J>,
        car_type: &CarType,
        control: Control,
    ) -> Result<ControlOutcome, WidgetError> {
        let product_id = self.config.product_id.clone().ok_or(WidgetError::Unbound)?;
        let current = store.load()?.quantity(&product_id, car_type.as_str());

        let mutation = match control {
            Control::Increase => Mutation::increase(product_id, "", car_type.clone(), 1),
            Control::Decrease if current <= self.config.min_quantity => {
                self.refresh(store);
                return Ok(ControlOutcome::default());
            }
            Control::Decrease => Mutation::decrease(product_id, car_type.clone()),
            Control::Set(input) => match parse_set_quantity(&input, self.config.min_quantity) {
                Some(quantity) => Mutation::set_quantity(product_id, "", car_type.clone(), quantity),
                None => {
                    self.logger
                        .debug_builder("quantity input rejected")
                        .field("input", input)
                        .emit();
                    self.refresh(store);
                    return Ok(ControlOutcome::default());
                }
            },
            Control::Remove => Mutation::remove(product_id, car_type.clone()),
        };

        let (_, change) = store.mutate(&mutation)?;
        self.refresh(store);

        if change.is_noop() {
            return Ok(ControlOutcome {
                change: Some(change),
                event: None,
            });
        }
        let event = if change.after == 0 {
            WidgetEvent::removed(change.product_id.clone(), change.car_type.clone())
        } else {
            WidgetEvent::updated(
                change.product_id.clone(),
                change.car_type.clone(),
                change.after,
                change.action,
            )
        };
        Ok(ControlOutcome {
            change: Some(change),
            event: Some(event),
        })
    }
}

fn parse_set_quantity(input: &str, min: u32) -> Option<u32> {
    input
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|q| *q >= min.max(1))
}

impl ControlOutcome {
    /// The action performed, if any.
    pub fn action(&self) -> Option<Action> {
        self.change.as_ref().map(|c| c.action)
    }
}
