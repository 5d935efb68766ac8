//! Cascading make → model → year selector.
//!
//! [`SelectorState`] is the synchronous state machine: choosing a value
//! returns a [`LookupTicket`] for the dependent lookup, and the lookup's
//! result is fed back with that ticket. Tickets carry a per-stage
//! generation, so a response for a selection that has since changed is
//! recognised and dropped. [`SelectorWidget`] drives the machine against a
//! [`LookupApi`] and writes submissions to the ledger.

use fitment_ledger::{CarType, Change, Mutation, ProductId, MAX_QUANTITY_PER_CAR_TYPE};
use fitment_lookup::{LookupApi, LookupError, LookupStage};
use fitment_observability::StructuredLogger;
use fitment_store::{CookieJar, LedgerStore, StoreError};
use serde::Serialize;

use crate::config::SelectorSettings;
use crate::events::WidgetEvent;
use crate::WidgetError;

/// The three select inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectField {
    Make,
    Model,
    Year,
}

impl SelectField {
    /// Lookup that fills this field's options.
    pub fn source(&self) -> LookupStage {
        match self {
            Self::Make => LookupStage::Makes,
            Self::Model => LookupStage::Models,
            Self::Year => LookupStage::Years,
        }
    }
}

/// Options, current value and enabled flag of one select.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldState {
    pub options: Vec<String>,
    pub value: String,
    pub enabled: bool,
}

impl FieldState {
    fn reset(&mut self) {
        self.options.clear();
        self.value.clear();
        self.enabled = false;
    }

    pub fn is_chosen(&self) -> bool {
        !self.value.is_empty()
    }
}

/// How far the shopper has got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum SelectorPhase {
    NoMake,
    MakeChosen,
    ModelChosen,
    /// Make, model and year chosen and seat rows settled; submit enabled.
    YearChosen,
}

/// State of the third-row option on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ThirdRowOption {
    /// The page has no such option.
    Absent,
    Enabled,
    Disabled,
}

/// Handle for one in-flight lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LookupTicket {
    pub stage: LookupStage,
    pub generation: u64,
}

/// What became of a delivered lookup result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Applied,
    /// The selection moved on; the result was dropped.
    Stale,
}

/// The selector state machine.
#[derive(Debug, Clone, Serialize)]
pub struct SelectorState {
    pub make: FieldState,
    pub model: FieldState,
    pub year: FieldState,
    /// Seat rows for the chosen vehicle once settled.
    pub seat_rows: Option<u32>,
    pub third_row: ThirdRowOption,
    #[serde(skip)]
    generations: [u64; 4],
    #[serde(skip)]
    default_seat_rows: u32,
}

fn slot(stage: LookupStage) -> usize {
    stage.depth()
}

impl SelectorState {
    /// Fresh selector. `has_third_row_option` says whether the page shows
    /// the third-row option at all.
    pub fn new(has_third_row_option: bool, default_seat_rows: u32) -> Self {
        Self {
            make: FieldState::default(),
            model: FieldState::default(),
            year: FieldState::default(),
            seat_rows: None,
            third_row: if has_third_row_option {
                ThirdRowOption::Enabled
            } else {
                ThirdRowOption::Absent
            },
            generations: [0; 4],
            default_seat_rows,
        }
    }

    pub fn field(&self, field: SelectField) -> &FieldState {
        match field {
            SelectField::Make => &self.make,
            SelectField::Model => &self.model,
            SelectField::Year => &self.year,
        }
    }

    pub fn phase(&self) -> SelectorPhase {
        if !self.make.is_chosen() {
            SelectorPhase::NoMake
        } else if !self.model.is_chosen() {
            SelectorPhase::MakeChosen
        } else if !self.year.is_chosen() || self.seat_rows.is_none() {
            SelectorPhase::ModelChosen
        } else {
            SelectorPhase::YearChosen
        }
    }

    pub fn can_submit(&self) -> bool {
        self.phase() == SelectorPhase::YearChosen
    }

    /// `"{make} {model} {year}"` once all three are chosen.
    pub fn car_type_label(&self) -> Option<CarType> {
        if !(self.make.is_chosen() && self.model.is_chosen() && self.year.is_chosen()) {
            return None;
        }
        Some(CarType::new(format!(
            "{} {} {}",
            self.make.value, self.model.value, self.year.value
        )))
    }

    pub fn is_current(&self, ticket: &LookupTicket) -> bool {
        self.generations[slot(ticket.stage)] == ticket.generation
    }

    /// Invalidate `stage` and everything downstream; returns a ticket for `stage`.
    fn bump_from(&mut self, stage: LookupStage) -> LookupTicket {
        for later in LookupStage::ALL.iter().filter(|s| s.depth() >= stage.depth()) {
            self.generations[slot(*later)] += 1;
        }
        LookupTicket {
            stage,
            generation: self.generations[slot(stage)],
        }
    }

    fn clear_seat_rows(&mut self) {
        self.seat_rows = None;
        if self.third_row != ThirdRowOption::Absent {
            self.third_row = ThirdRowOption::Enabled;
        }
    }

    /// Start (or restart) loading makes. The make select is disabled until
    /// the result arrives.
    pub fn connect(&mut self) -> LookupTicket {
        self.make.reset();
        self.model.reset();
        self.year.reset();
        self.clear_seat_rows();
        self.bump_from(LookupStage::Makes)
    }

    pub fn receive_makes(
        &mut self,
        ticket: LookupTicket,
        result: Result<Vec<String>, LookupError>,
    ) -> Delivery {
        if ticket.stage != LookupStage::Makes || !self.is_current(&ticket) {
            return Delivery::Stale;
        }
        self.make.options = result.unwrap_or_default();
        // enabled whether or not the lookup worked
        self.make.enabled = true;
        Delivery::Applied
    }

    /// Choose a make. Model and year are cleared; a blank make issues no lookup.
    pub fn choose_make(&mut self, value: &str) -> Option<LookupTicket> {
        let ticket = self.bump_from(LookupStage::Models);
        self.make.value = value.trim().to_string();
        self.model.reset();
        self.year.reset();
        self.clear_seat_rows();
        self.make.is_chosen().then_some(ticket)
    }

    pub fn receive_models(
        &mut self,
        ticket: LookupTicket,
        result: Result<Vec<String>, LookupError>,
    ) -> Delivery {
        if ticket.stage != LookupStage::Models || !self.is_current(&ticket) {
            return Delivery::Stale;
        }
        fill(&mut self.model, result);
        Delivery::Applied
    }

    /// Choose a model. Year is cleared; a blank model issues no lookup.
    pub fn choose_model(&mut self, value: &str) -> Option<LookupTicket> {
        let ticket = self.bump_from(LookupStage::Years);
        self.model.value = value.trim().to_string();
        self.year.reset();
        self.clear_seat_rows();
        (self.make.is_chosen() && self.model.is_chosen()).then_some(ticket)
    }

    pub fn receive_years(
        &mut self,
        ticket: LookupTicket,
        result: Result<Vec<String>, LookupError>,
    ) -> Delivery {
        if ticket.stage != LookupStage::Years || !self.is_current(&ticket) {
            return Delivery::Stale;
        }
        fill(&mut self.year, result);
        Delivery::Applied
    }

    /// Choose a year; a blank year disables submit and issues no lookup.
    pub fn choose_year(&mut self, value: &str) -> Option<LookupTicket> {
        let ticket = self.bump_from(LookupStage::SeatRows);
        self.year.value = value.trim().to_string();
        self.clear_seat_rows();
        (self.make.is_chosen() && self.model.is_chosen() && self.year.is_chosen()).then_some(ticket)
    }

    /// Settle the seat row count; failures and zero fall back to the default.
    pub fn receive_seat_rows(
        &mut self,
        ticket: LookupTicket,
        result: Result<u32, LookupError>,
    ) -> Delivery {
        if ticket.stage != LookupStage::SeatRows || !self.is_current(&ticket) {
            return Delivery::Stale;
        }
        let rows = match result {
            Ok(rows) if rows > 0 => rows,
            _ => self.default_seat_rows,
        };
        self.seat_rows = Some(rows);
        if self.third_row != ThirdRowOption::Absent {
            self.third_row = if rows < 3 {
                ThirdRowOption::Disabled
            } else {
                ThirdRowOption::Enabled
            };
        }
        Delivery::Applied
    }

    /// The mutation a submit would perform.
    pub fn submission(
        &self,
        product_id: ProductId,
        product_name: &str,
        quantity_input: Option<&str>,
    ) -> Result<Mutation, WidgetError> {
        if !self.can_submit() {
            return Err(WidgetError::SelectionIncomplete(format!(
                "phase {:?}",
                self.phase()
            )));
        }
        let car_type = self
            .car_type_label()
            .ok_or_else(|| WidgetError::SelectionIncomplete("no vehicle".to_string()))?;
        Ok(Mutation::add(
            product_id,
            product_name,
            car_type,
            parse_quantity(quantity_input),
        ))
    }
}

fn fill(field: &mut FieldState, result: Result<Vec<String>, LookupError>) {
    match result {
        Ok(options) => {
            field.enabled = !options.is_empty();
            field.options = options;
        }
        Err(_) => {
            field.options.clear();
            field.enabled = false;
        }
    }
}

/// Quantity typed next to the submit button; absent, non-numeric or
/// below 1 means 1, and anything above the per-type cap is clamped to it.
pub fn parse_quantity(input: Option<&str>) -> u32 {
    input
        .and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|q| *q >= 1)
        .map(|q| {
            u32::try_from(q.min(i64::from(MAX_QUANTITY_PER_CAR_TYPE)))
                .unwrap_or(MAX_QUANTITY_PER_CAR_TYPE)
        })
        .unwrap_or(1)
}

/// Result of a submit: the event to dispatch, and whether the ledger
/// accepted the selection.
#[derive(Debug)]
pub struct Submission {
    pub event: WidgetEvent,
    pub saved: Result<Change, StoreError>,
}

impl Submission {
    pub fn is_saved(&self) -> bool {
        self.saved.is_ok()
    }
}

/// Selector bound to a lookup API.
pub struct SelectorWidget<L> {
    lookup: L,
    state: SelectorState,
    logger: StructuredLogger,
}

impl<L: LookupApi> SelectorWidget<L> {
    pub fn new(
        lookup: L,
        settings: &SelectorSettings,
        has_third_row_option: bool,
        logger: StructuredLogger,
    ) -> Self {
        Self {
            lookup,
            state: SelectorState::new(has_third_row_option, settings.default_seat_rows),
            logger: logger.child("selector"),
        }
    }

    pub fn state(&self) -> &SelectorState {
        &self.state
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Load makes.
    pub async fn connect(&mut self) -> Delivery {
        let ticket = self.state.connect();
        let result = self.lookup.makes().await;
        self.log_failure(ticket.stage, &result);
        self.state.receive_makes(ticket, result)
    }

    pub async fn select_make(&mut self, make: &str) -> Option<Delivery> {
        let ticket = self.state.choose_make(make)?;
        let result = self.lookup.models(&self.state.make.value).await;
        self.log_failure(ticket.stage, &result);
        Some(self.deliver_models(ticket, result))
    }

    pub async fn select_model(&mut self, model: &str) -> Option<Delivery> {
        let ticket = self.state.choose_model(model)?;
        let result = self
            .lookup
            .years(&self.state.make.value, &self.state.model.value)
            .await;
        self.log_failure(ticket.stage, &result);
        Some(self.deliver_years(ticket, result))
    }

    pub async fn select_year(&mut self, year: &str) -> Option<Delivery> {
        let ticket = self.state.choose_year(year)?;
        let result = self
            .lookup
            .seat_rows(
                &self.state.make.value,
                &self.state.model.value,
                &self.state.year.value,
            )
            .await;
        self.log_failure(ticket.stage, &result);
        let delivery = self.state.receive_seat_rows(ticket, result);
        if let Some(rows) = self.state.seat_rows {
            self.logger
                .debug_builder("seat rows settled")
                .field_i64("seat_rows", i64::from(rows))
                .field("third_row", format!("{:?}", self.state.third_row))
                .emit();
        }
        Some(delivery)
    }

    /// Deliver a models result that may have been overtaken.
    pub fn deliver_models(
        &mut self,
        ticket: LookupTicket,
        result: Result<Vec<String>, LookupError>,
    ) -> Delivery {
        let delivery = self.state.receive_models(ticket, result);
        self.log_stale(ticket, delivery);
        delivery
    }

    /// Deliver a years result that may have been overtaken.
    pub fn deliver_years(
        &mut self,
        ticket: LookupTicket,
        result: Result<Vec<String>, LookupError>,
    ) -> Delivery {
        let delivery = self.state.receive_years(ticket, result);
        self.log_stale(ticket, delivery);
        delivery
    }

    /// Add the chosen vehicle to the ledger.
    ///
    /// The `carTypeAdded` event is produced even when persistence fails;
    /// the failure is logged and carried in [`Submission::saved`]. Only an
    /// incomplete selection is an error.
    pub fn submit<J: CookieJar>(
        &self,
        store: &mut LedgerStore<J>,
        product_id: ProductId,
        product_name: &str,
        quantity_input: Option<&str>,
    ) -> Result<Submission, WidgetError> {
        let mutation = self.state.submission(product_id, product_name, quantity_input)?;
        let saved = store.mutate(&mutation).map(|(_, change)| change);
        match &saved {
            Ok(change) => self
                .logger
                .info_builder("selection recorded")
                .field("product_id", mutation.product_id.as_str())
                .field("car_type", mutation.car_type.as_str())
                .field_i64("quantity", i64::from(change.after))
                .emit(),
            Err(e) => self
                .logger
                .error_builder("failed to record selection")
                .field("product_id", mutation.product_id.as_str())
                .field("car_type", mutation.car_type.as_str())
                .field_display("error", e)
                .emit(),
        }
        Ok(Submission {
            event: WidgetEvent::added(mutation.product_id, mutation.car_type, mutation.quantity),
            saved,
        })
    }

    fn log_failure<T>(&self, stage: LookupStage, result: &Result<T, LookupError>) {
        if let Err(e) = result {
            self.logger
                .warn_builder("lookup failed")
                .field("stage", stage.name())
                .field_display("error", e)
                .emit();
        }
    }

    fn log_stale(&self, ticket: LookupTicket, delivery: Delivery) {
        if delivery == Delivery::Stale {
            self.logger
                .debug_builder("stale lookup response dropped")
                .field("stage", ticket.stage.name())
                .field_i64("generation", ticket.generation as i64)
                .emit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitment_lookup::StaticLookup;
    use fitment_observability::{LogLevel, MemorySink};
    use fitment_store::{CookieSettings, MemoryJar};
    use std::sync::Arc;

    fn options(items: &[&str]) -> Result<Vec<String>, LookupError> {
        Ok(items.iter().map(|s| s.to_string()).collect())
    }

    fn ready_state() -> SelectorState {
        let mut state = SelectorState::new(true, 2);
        let t = state.connect();
        state.receive_makes(t, options(&["Toyota"]));
        let t = state.choose_make("Toyota").unwrap();
        state.receive_models(t, options(&["Camry"]));
        let t = state.choose_model("Camry").unwrap();
        state.receive_years(t, options(&["2021"]));
        let t = state.choose_year("2021").unwrap();
        state.receive_seat_rows(t, Ok(2));
        state
    }

    #[test]
    fn test_make_enabled_even_on_failure() {
        let mut state = SelectorState::new(false, 2);
        let ticket = state.connect();
        assert!(!state.make.enabled);
        state.receive_makes(ticket, Err(LookupError::Connection("down".into())));
        assert!(state.make.enabled);
        assert!(state.make.options.is_empty());
    }

    #[test]
    fn test_phases() {
        let mut state = SelectorState::new(true, 2);
        assert_eq!(state.phase(), SelectorPhase::NoMake);
        let t = state.choose_make("Toyota").unwrap();
        assert_eq!(state.phase(), SelectorPhase::MakeChosen);
        state.receive_models(t, options(&["Camry"]));
        assert!(state.model.enabled);
        let t = state.choose_model("Camry").unwrap();
        state.receive_years(t, options(&["2021"]));
        let t = state.choose_year("2021").unwrap();
        assert_eq!(state.phase(), SelectorPhase::ModelChosen);
        assert!(!state.can_submit());
        state.receive_seat_rows(t, Ok(3));
        assert_eq!(state.phase(), SelectorPhase::YearChosen);
        assert!(state.can_submit());
        assert_eq!(state.car_type_label().unwrap().as_str(), "Toyota Camry 2021");
    }

    #[test]
    fn test_empty_models_keep_select_disabled() {
        let mut state = SelectorState::new(false, 2);
        let t = state.choose_make("Rare").unwrap();
        state.receive_models(t, Ok(Vec::new()));
        assert!(!state.model.enabled);
    }

    #[test]
    fn test_upstream_change_resets_downstream() {
        let mut state = ready_state();
        state.choose_make("Honda");
        assert_eq!(state.model, FieldState::default());
        assert_eq!(state.year, FieldState::default());
        assert_eq!(state.seat_rows, None);
        assert!(!state.can_submit());

        let mut state = ready_state();
        assert!(state.choose_model("").is_none());
        assert!(!state.year.enabled);
        assert_eq!(state.phase(), SelectorPhase::MakeChosen);

        let mut state = ready_state();
        assert!(state.choose_year("").is_none());
        assert!(!state.can_submit());
    }

    #[test]
    fn test_stale_models_response_ignored() {
        let mut state = SelectorState::new(false, 2);
        let toyota = state.choose_make("Toyota").unwrap();
        let honda = state.choose_make("Honda").unwrap();

        assert_eq!(state.receive_models(honda, options(&["Civic"])), Delivery::Applied);
        assert_eq!(
            state.receive_models(toyota, options(&["Camry"])),
            Delivery::Stale
        );
        assert_eq!(state.model.options, vec!["Civic"]);
    }

    #[test]
    fn test_stale_seat_rows_ignored() {
        let mut state = ready_state();
        let first = state.choose_year("2021").unwrap();
        let second = state.choose_year("2020").unwrap();
        assert_eq!(state.receive_seat_rows(first, Ok(3)), Delivery::Stale);
        assert_eq!(state.receive_seat_rows(second, Ok(2)), Delivery::Applied);
        assert_eq!(state.third_row, ThirdRowOption::Disabled);
    }

    #[test]
    fn test_ticket_for_wrong_stage_is_stale() {
        let mut state = SelectorState::new(false, 2);
        let models = state.choose_make("Toyota").unwrap();
        assert_eq!(state.receive_years(models, options(&["2021"])), Delivery::Stale);
    }

    #[test]
    fn test_third_row_rules() {
        let mut state = ready_state();
        assert_eq!(state.third_row, ThirdRowOption::Disabled);

        let t = state.choose_year("2021").unwrap();
        state.receive_seat_rows(t, Ok(3));
        assert_eq!(state.third_row, ThirdRowOption::Enabled);

        let t = state.choose_year("2021").unwrap();
        state.receive_seat_rows(t, Err(LookupError::Unsuccessful(LookupStage::SeatRows)));
        assert_eq!(state.seat_rows, Some(2));
        assert_eq!(state.third_row, ThirdRowOption::Disabled);

        let t = state.choose_year("2021").unwrap();
        state.receive_seat_rows(t, Ok(0));
        assert_eq!(state.seat_rows, Some(2));
    }

    #[test]
    fn test_third_row_absent_is_noop() {
        let mut state = SelectorState::new(false, 2);
        let t = state.choose_make("Toyota").unwrap();
        state.receive_models(t, options(&["Camry"]));
        let t = state.choose_model("Camry").unwrap();
        state.receive_years(t, options(&["2021"]));
        let t = state.choose_year("2021").unwrap();
        state.receive_seat_rows(t, Ok(2));
        assert_eq!(state.third_row, ThirdRowOption::Absent);
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(None), 1);
        assert_eq!(parse_quantity(Some("abc")), 1);
        assert_eq!(parse_quantity(Some("0")), 1);
        assert_eq!(parse_quantity(Some("-3")), 1);
        assert_eq!(parse_quantity(Some(" 4 ")), 4);
        assert_eq!(parse_quantity(Some("9999")), MAX_QUANTITY_PER_CAR_TYPE);
        assert_eq!(parse_quantity(Some("10000")), MAX_QUANTITY_PER_CAR_TYPE);
        assert_eq!(parse_quantity(Some("99999999999")), MAX_QUANTITY_PER_CAR_TYPE);
    }

    #[test]
    fn test_submission_requires_complete_selection() {
        let state = SelectorState::new(false, 2);
        assert!(matches!(
            state.submission(ProductId::new("P1"), "Mats", None),
            Err(WidgetError::SelectionIncomplete(_))
        ));
        let mutation = ready_state()
            .submission(ProductId::new("P1"), "Mats", Some("2"))
            .unwrap();
        assert_eq!(mutation.car_type.as_str(), "Toyota Camry 2021");
        assert_eq!(mutation.quantity, 2);
    }

    #[tokio::test]
    async fn test_widget_flow_and_submit() {
        let sink = MemorySink::new();
        let logger = StructuredLogger::new("test")
            .with_sink(Arc::new(sink.clone()))
            .with_min_level(LogLevel::Debug);
        let lookup = StaticLookup::new()
            .vehicle("Toyota", "Highlander", "2021", 3)
            .failing(LookupStage::SeatRows);
        let mut widget = SelectorWidget::new(lookup, &SelectorSettings::default(), true, logger.clone());

        widget.connect().await;
        assert_eq!(widget.state().make.options, vec!["Toyota"]);
        widget.select_make("Toyota").await;
        widget.select_model("Highlander").await;
        widget.select_year("2021").await;
        // seat rows failed, so the default applies
        assert_eq!(widget.state().seat_rows, Some(2));
        assert_eq!(widget.state().third_row, ThirdRowOption::Disabled);
        assert!(sink.contains("lookup failed"));

        let mut store = LedgerStore::new(MemoryJar::from_header("cart=c1"), CookieSettings::default(), logger);
        let submission = widget
            .submit(&mut store, ProductId::new("P1"), "Floor Mats", Some("abc"))
            .unwrap();
        assert!(submission.is_saved());
        assert_eq!(submission.event.detail.quantity, Some(1));
        assert_eq!(
            store.load().unwrap().quantity(&ProductId::new("P1"), "Toyota Highlander 2021"),
            1
        );
    }

    #[tokio::test]
    async fn test_submit_dispatches_even_when_store_fails() {
        let sink = MemorySink::new();
        let logger = StructuredLogger::new("test").with_sink(Arc::new(sink.clone()));
        let lookup = StaticLookup::new().vehicle("Toyota", "Camry", "2021", 2);
        let mut widget = SelectorWidget::new(lookup, &SelectorSettings::default(), false, logger.clone());
        widget.select_make("Toyota").await;
        widget.select_model("Camry").await;
        widget.select_year("2021").await;

        let mut store = LedgerStore::new(
            fitment_store::HeaderJar::new("cart=c1"),
            CookieSettings::default(),
            logger,
        );
        let submission = widget
            .submit(&mut store, ProductId::new("P1"), "Mats", None)
            .unwrap();
        assert_eq!(submission.event.kind, crate::events::EventKind::CarTypeAdded);
        assert!(matches!(submission.saved, Err(StoreError::JarError(_))));
        assert!(sink.contains("failed to record selection"));
    }

    #[tokio::test]
    async fn test_submit_over_cap_quantity() {
        let sink = MemorySink::new();
        let logger = StructuredLogger::new("test").with_sink(Arc::new(sink.clone()));
        let lookup = StaticLookup::new().vehicle("Toyota", "Camry", "2021", 2);
        let mut widget = SelectorWidget::new(lookup, &SelectorSettings::default(), false, logger.clone());
        widget.select_make("Toyota").await;
        widget.select_model("Camry").await;
        widget.select_year("2021").await;
        let mut store = LedgerStore::new(MemoryJar::from_header("cart=c1"), CookieSettings::default(), logger);
        let p1 = ProductId::new("P1");

        let submission = widget.submit(&mut store, p1.clone(), "Mats", Some("10000")).unwrap();
        assert!(submission.is_saved());
        assert_eq!(submission.event.detail.quantity, Some(MAX_QUANTITY_PER_CAR_TYPE));
        assert_eq!(
            store.load().unwrap().quantity(&p1, "Toyota Camry 2021"),
            MAX_QUANTITY_PER_CAR_TYPE
        );

        // already at the cap: the save fails and says so
        let submission = widget.submit(&mut store, p1.clone(), "Mats", Some("1")).unwrap();
        assert!(!submission.is_saved());
        assert!(matches!(
            submission.saved,
            Err(StoreError::Ledger(fitment_ledger::LedgerError::QuantityExceedsLimit(_, _)))
        ));
        assert_eq!(
            store.load().unwrap().quantity(&p1, "Toyota Camry 2021"),
            MAX_QUANTITY_PER_CAR_TYPE
        );
        assert!(sink.contains("failed to record selection"));
    }
}
