//! Interactive vehicle selection, the terminal counterpart of the
//! product-page selector.

use anyhow::{bail, Context as _, Result};
use dialoguer::{Input, Select};
use fitment_ledger::ProductId;
use fitment_lookup::LookupApi;
use fitment_widgets::{resolve_product_name, PageMeta, SelectorWidget, ThirdRowOption};

use super::SelectArgs;
use crate::context::Context;
use crate::output::quantity_change;

/// Run the select command.
pub async fn run(args: SelectArgs, ctx: &Context) -> Result<()> {
    let client = ctx.lookup_client()?;
    let mut selector = SelectorWidget::new(
        client,
        &ctx.config.selector,
        args.third_row,
        ctx.logger.clone(),
    );

    let spinner = ctx.output.spinner("Loading makes...");
    selector.connect().await;
    spinner.finish_and_clear();
    let make = choose("Make", &selector.state().make.options)?;

    let spinner = ctx.output.spinner("Loading models...");
    selector.select_make(&make).await;
    spinner.finish_and_clear();
    let model = choose("Model", &selector.state().model.options)?;

    let spinner = ctx.output.spinner("Loading years...");
    selector.select_model(&model).await;
    spinner.finish_and_clear();
    let year = choose("Year", &selector.state().year.options)?;

    let spinner = ctx.output.spinner("Checking seat rows...");
    selector.select_year(&year).await;
    spinner.finish_and_clear();

    report_third_row(&selector, ctx);

    let quantity = match args.quantity {
        Some(quantity) => quantity,
        None => Input::<String>::new()
            .with_prompt("Quantity")
            .default("1".to_string())
            .interact_text()?,
    };

    let mut store = ctx.open_store()?;
    let product_id = ProductId::new(args.product.as_str());
    let page = PageMeta {
        title: args.name,
        og_title: None,
    };
    let name = resolve_product_name(&page, &store.load()?, &product_id);
    let submission = selector.submit(&mut store, product_id, &name, Some(quantity.as_str()))?;
    let change = submission
        .saved
        .with_context(|| format!("Failed to record selection for {}", name))?;
    let event = submission.event;

    if ctx.output.is_json() {
        ctx.output.json(&event);
        return Ok(());
    }

    let car_type = event
        .detail
        .car_type
        .as_ref()
        .map(|c| c.to_string())
        .unwrap_or_default();
    ctx.output.success(&format!(
        "Added {} x{} to {} ({})",
        car_type,
        event.detail.quantity.unwrap_or(1),
        name,
        quantity_change(change.before, change.after)
    ));

    Ok(())
}

fn choose(prompt: &str, options: &[String]) -> Result<String> {
    if options.is_empty() {
        bail!("No {} options available", prompt.to_lowercase());
    }
    let index = Select::new()
        .with_prompt(prompt)
        .items(options)
        .default(0)
        .interact()?;
    Ok(options[index].clone())
}

fn report_third_row<L: LookupApi>(selector: &SelectorWidget<L>, ctx: &Context) {
    let state = selector.state();
    if let Some(rows) = state.seat_rows {
        ctx.output.debug(&format!("Seat rows: {}", rows));
    }
    match state.third_row {
        ThirdRowOption::Disabled => ctx.output.warn(&format!(
            "\"{}\" is not available for this vehicle",
            ctx.config.selector.third_row_option
        )),
        ThirdRowOption::Enabled => ctx.output.info(&format!(
            "\"{}\" is available",
            ctx.config.selector.third_row_option
        )),
        ThirdRowOption::Absent => {}
    }
}
