//! Direct queries against the vehicle lookup API.

use anyhow::{Context as _, Result};
use fitment_lookup::{LookupApi, LookupStage};
use serde_json::{json, Map, Value};

use super::{LookupArgs, LookupCommand};
use crate::context::Context;

enum Fetched {
    Options(Vec<String>),
    SeatRows(u32),
}

/// Run the lookup command.
pub async fn run(args: LookupArgs, ctx: &Context) -> Result<()> {
    let client = ctx.lookup_client()?;

    let stage = match &args.command {
        LookupCommand::Makes => LookupStage::Makes,
        LookupCommand::Models { .. } => LookupStage::Models,
        LookupCommand::Years { .. } => LookupStage::Years,
        LookupCommand::SeatRows { .. } => LookupStage::SeatRows,
    };

    let spinner = ctx.output.spinner(&format!("Fetching {}...", stage));
    let result = match &args.command {
        LookupCommand::Makes => client.makes().await.map(Fetched::Options),
        LookupCommand::Models { make } => client.models(make).await.map(Fetched::Options),
        LookupCommand::Years { make, model } => {
            client.years(make, model).await.map(Fetched::Options)
        }
        LookupCommand::SeatRows { make, model, year } => {
            client.seat_rows(make, model, year).await.map(Fetched::SeatRows)
        }
    };
    spinner.finish_and_clear();

    match result.with_context(|| format!("{} lookup failed", stage))? {
        Fetched::SeatRows(rows) => {
            if ctx.output.is_json() {
                ctx.output.json(&json!({ "seatRows": rows }));
            } else {
                ctx.output.kv("seat rows", &rows.to_string());
            }
        }
        Fetched::Options(options) => {
            if ctx.output.is_json() {
                let mut body = Map::new();
                body.insert(stage.field().to_string(), json!(options));
                ctx.output.json(&Value::Object(body));
                return Ok(());
            }
            ctx.output.header(&format!("{} ({})", stage, options.len()));
            for option in &options {
                ctx.output.list_item(option);
            }
        }
    }

    Ok(())
}
