//! Fitment CLI - inspect and edit vehicle-fitment selections.
//!
//! Cookies live in a JSON jar file, so the same ledger the storefront
//! widgets write can be examined and replayed from a terminal.
//!
//! Commands:
//! - `fitment show` - Print the ledger or its order-note summary
//! - `fitment apply` - Apply one mutation to a product's car types
//! - `fitment remove` - Drop every selection for a product
//! - `fitment import` - Load cookies from a `document.cookie` string
//! - `fitment lookup` - Query the vehicle lookup API
//! - `fitment select` - Pick a vehicle interactively and record it
//! - `fitment config` - Manage configuration

mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{ApplyArgs, ConfigArgs, ImportArgs, LookupArgs, RemoveArgs, SelectArgs, ShowArgs};

/// Default location of the cookie jar, relative to the working directory.
pub const DEFAULT_JAR: &str = ".fitment/cookies.json";

/// Fitment CLI - record which vehicles a product was bought for
#[derive(Parser)]
#[command(name = "fitment")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Cookie jar file
    #[arg(long, global = true, default_value = DEFAULT_JAR)]
    jar: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show recorded selections
    Show(ShowArgs),

    /// Apply a mutation to a product's car types
    Apply(ApplyArgs),

    /// Remove every selection for a product
    Remove(RemoveArgs),

    /// Import cookies from a cookie header string
    Import(ImportArgs),

    /// Query the vehicle lookup API
    Lookup(LookupArgs),

    /// Choose a vehicle interactively and add it to a product
    Select(SelectArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = context::Context::load(cli.config.as_deref(), &cli.jar, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Show(args) => commands::show::run(args, &ctx).await,
        Commands::Apply(args) => commands::apply::run(args, &ctx).await,
        Commands::Remove(args) => commands::apply::remove(args, &ctx).await,
        Commands::Import(args) => commands::import::run(args, &ctx).await,
        Commands::Lookup(args) => commands::lookup::run(args, &ctx).await,
        Commands::Select(args) => commands::select::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{ConfigCommand, LookupCommand};

    #[test]
    fn test_global_args() {
        let cli = Cli::try_parse_from(["fitment", "show", "--json", "-v"]).unwrap();
        assert!(cli.json);
        assert!(cli.verbose);
        assert_eq!(cli.jar, DEFAULT_JAR);
        assert!(matches!(cli.command, Commands::Show(_)));
    }

    #[test]
    fn test_apply_args() {
        let cli = Cli::try_parse_from([
            "fitment",
            "--jar",
            "/tmp/jar.json",
            "apply",
            "P1",
            "Toyota Camry 2021",
            "--action",
            "setQuantity",
            "-q",
            "3",
        ])
        .unwrap();
        assert_eq!(cli.jar, "/tmp/jar.json");
        match cli.command {
            Commands::Apply(args) => {
                assert_eq!(args.product, "P1");
                assert_eq!(args.car_type, "Toyota Camry 2021");
                assert_eq!(args.action, "setQuantity");
                assert_eq!(args.quantity, 3);
            }
            _ => panic!("expected apply"),
        }
    }

    #[test]
    fn test_apply_defaults() {
        let cli = Cli::try_parse_from(["fitment", "apply", "P1", "SUV"]).unwrap();
        match cli.command {
            Commands::Apply(args) => {
                assert_eq!(args.action, "add");
                assert_eq!(args.quantity, 1);
                assert!(args.name.is_none());
            }
            _ => panic!("expected apply"),
        }
    }

    #[test]
    fn test_lookup_subcommands() {
        let cli = Cli::try_parse_from(["fitment", "lookup", "years", "Toyota", "Camry"]).unwrap();
        match cli.command {
            Commands::Lookup(args) => match args.command {
                LookupCommand::Years { make, model } => {
                    assert_eq!((make.as_str(), model.as_str()), ("Toyota", "Camry"));
                }
                _ => panic!("expected years"),
            },
            _ => panic!("expected lookup"),
        }
        assert!(Cli::try_parse_from(["fitment", "lookup", "seat-rows", "Toyota", "Camry"]).is_err());
    }

    #[test]
    fn test_config_init_force() {
        let cli = Cli::try_parse_from(["fitment", "config", "init", "--force"]).unwrap();
        match cli.command {
            Commands::Config(args) => assert!(matches!(args.command, ConfigCommand::Init { force: true })),
            _ => panic!("expected config"),
        }
    }
}
