//! Configuration management commands.

use anyhow::{bail, Result};
use fitment_widgets::FitmentConfig;

use super::{ConfigArgs, ConfigCommand};
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }
    ctx.output.kv("jar", &ctx.jar_path.display().to_string());

    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &ctx.config.api.base_url);
    ctx.output.kv("timeout_ms", &ctx.config.api.timeout_ms.to_string());

    ctx.output.info("");
    ctx.output.info("[cookies]");
    ctx.output.kv("cart_cookie", &ctx.config.cookies.cart_cookie);
    ctx.output.kv("ledger_cookie", &ctx.config.cookies.ledger_cookie);
    ctx.output.kv("ttl_days", &ctx.config.cookies.ttl_days.to_string());

    ctx.output.info("");
    ctx.output.info("[selector]");
    ctx.output
        .kv("third_row_option", &ctx.config.selector.third_row_option);
    ctx.output.kv(
        "default_seat_rows",
        &ctx.config.selector.default_seat_rows.to_string(),
    );

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    FitmentConfig::default().save(&config_path)?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
