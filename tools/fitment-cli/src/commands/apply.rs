//! Ledger mutations from the command line.

use anyhow::{Context as _, Result};
use fitment_ledger::{Action, Change, Mutation, ProductId};
use serde_json::{json, Value};

use super::{ApplyArgs, RemoveArgs};
use crate::context::Context;
use crate::output::quantity_change;

/// Run the apply command.
pub async fn run(args: ApplyArgs, ctx: &Context) -> Result<()> {
    let action: Action = args
        .action
        .parse()
        .with_context(|| format!("Invalid action: {}", args.action))?;
    let mut store = ctx.open_store()?;

    let mutation = Mutation::new(
        args.product.as_str(),
        args.name.unwrap_or_default(),
        args.car_type.as_str(),
        action,
        args.quantity,
    );
    let (ledger, change) = store.mutate(&mutation)?;

    if ctx.output.is_json() {
        ctx.output.json(&change_json(&change));
        return Ok(());
    }

    if change.is_noop() {
        ctx.output.info(&format!(
            "{} / {}: unchanged at {}",
            change.product_id, change.car_type, change.after
        ));
    } else {
        ctx.output.success(&format!(
            "{} / {}: {}",
            change.product_id,
            change.car_type,
            quantity_change(change.before, change.after)
        ));
    }
    if change.product_removed() {
        ctx.output
            .info(&format!("No car types left; {} removed from the ledger", change.product_id));
    }
    ctx.output.debug(&format!(
        "{} product(s) in ledger for cart {}",
        ledger.products().count(),
        ledger.cart_id()
    ));

    Ok(())
}

/// Run the remove command.
pub async fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let changes = store.remove_product(&ProductId::new(args.product.as_str()))?;

    if ctx.output.is_json() {
        let changes: Vec<Value> = changes.iter().map(change_json).collect();
        ctx.output.json(&changes);
        return Ok(());
    }

    if changes.is_empty() {
        ctx.output
            .info(&format!("No selections recorded for {}", args.product));
        return Ok(());
    }
    ctx.output.success(&format!(
        "Removed {} car type(s) from {}",
        changes.len(),
        args.product
    ));
    for change in &changes {
        ctx.output.list_item(&format!("{} ({})", change.car_type, change.before));
    }

    Ok(())
}

fn change_json(change: &Change) -> Value {
    json!({
        "productId": change.product_id,
        "carType": change.car_type,
        "action": change.action,
        "before": change.before,
        "after": change.after,
        "remainingTypes": change.remaining_types,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_json() {
        let change = Change {
            product_id: ProductId::new("P1"),
            car_type: "SUV".into(),
            action: Action::SetQuantity,
            before: 1,
            after: 4,
            remaining_types: 2,
        };
        assert_eq!(
            change_json(&change),
            json!({
                "productId": "P1",
                "carType": "SUV",
                "action": "setQuantity",
                "before": 1,
                "after": 4,
                "remainingTypes": 2,
            })
        );
    }
}
