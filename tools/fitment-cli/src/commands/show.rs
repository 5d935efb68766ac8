//! Print recorded selections.

use anyhow::Result;
use fitment_ledger::{summary_text, vehicle_labels, ProductId};
use fitment_widgets::{DisplayConfig, DisplayWidget};
use serde_json::json;

use super::ShowArgs;
use crate::context::Context;

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;

    if args.raw {
        let raw = store.load_raw()?.unwrap_or_default();
        if ctx.output.is_json() {
            ctx.output.json(&json!({ "raw": raw }));
        } else {
            println!("{}", raw);
        }
        return Ok(());
    }

    if let Some(product) = args.product {
        let mut display =
            DisplayWidget::new(DisplayConfig::cart_line(product.as_str()), ctx.logger.clone());
        display.refresh(&store);

        if args.html {
            println!("{}", display.html());
            return Ok(());
        }
        if ctx.output.is_json() {
            ctx.output.json(display.view());
            return Ok(());
        }

        let ledger = store.load()?;
        let session = store.session_cart_id()?.unwrap_or_default();
        let on_cart_line = !vehicle_labels(&ledger, &session, &ProductId::new(product.as_str()))
            .is_empty();
        ctx.output.header(&format!("Product {}", product));
        if display.view().is_empty() {
            ctx.output.info("No car types selected for this product.");
            return Ok(());
        }
        for row in &display.view().rows {
            ctx.output.kv(row.car_type.as_str(), &row.quantity.to_string());
        }
        if !on_cart_line {
            ctx.output
                .warn("Selections belong to another cart; they will not show on the cart line.");
        }
        return Ok(());
    }

    let ledger = store.load()?;
    if ctx.output.is_json() {
        ctx.output.json(&ledger);
        return Ok(());
    }

    ctx.output.header("Car type selections");
    ctx.output.kv("cart", ledger.cart_id().as_str());
    match store.session_cart_id()? {
        Some(session) if &session != ledger.cart_id() => {
            ctx.output.kv("session", session.as_str());
            ctx.output.warn("Ledger cart id differs from the session cart.");
        }
        Some(_) => {}
        None => ctx.output.debug("No cart cookie set"),
    }
    println!();
    ctx.output.text(&summary_text(&ledger));

    Ok(())
}
