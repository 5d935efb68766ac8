//! Seed the jar from a browser cookie header.

use anyhow::Result;
use serde_json::json;

use super::ImportArgs;
use crate::context::Context;

/// Run the import command.
pub async fn run(args: ImportArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store()?;
    let count = store.jar_mut().import_header(&args.header)?;

    // Reading back normalises legacy entries and reports malformed ones.
    let ledger = store.load()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "imported": count,
            "products": ledger.products().count(),
        }));
        return Ok(());
    }

    ctx.output.success(&format!(
        "Imported {} cookie(s) into {}",
        count,
        store.jar().path().display()
    ));
    if store.has_ledger()? {
        ctx.output
            .kv("products", &ledger.products().count().to_string());
    } else {
        ctx.output.info("No ledger cookie in the header");
    }

    Ok(())
}
