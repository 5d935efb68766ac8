//! CLI command implementations.

pub mod apply;
pub mod config;
pub mod import;
pub mod lookup;
pub mod select;
pub mod show;

use clap::{Args, Subcommand};

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Only show this product.
    #[arg(short, long)]
    pub product: Option<String>,

    /// Print the raw ledger cookie instead of the summary.
    #[arg(long)]
    pub raw: bool,

    /// Render the product's display as HTML (requires --product).
    #[arg(long, requires = "product")]
    pub html: bool,
}

/// Arguments for the apply command.
#[derive(Args)]
pub struct ApplyArgs {
    /// Product ID.
    pub product: String,

    /// Car type label, e.g. "Toyota Camry 2021".
    pub car_type: String,

    /// add, increase, decrease, setQuantity or remove.
    #[arg(short, long, default_value = "add")]
    pub action: String,

    /// Quantity for add, increase and setQuantity.
    #[arg(short, long, default_value_t = 1)]
    pub quantity: u32,

    /// Product name to record.
    #[arg(short, long)]
    pub name: Option<String>,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Product ID whose cart line was removed.
    pub product: String,
}

/// Arguments for the import command.
#[derive(Args)]
pub struct ImportArgs {
    /// Cookie header, e.g. "cart=abc; cart_details=...".
    pub header: String,
}

/// Arguments for the lookup command.
#[derive(Args)]
pub struct LookupArgs {
    #[command(subcommand)]
    pub command: LookupCommand,
}

#[derive(Subcommand)]
pub enum LookupCommand {
    /// List makes.
    Makes,
    /// List models for a make.
    Models {
        make: String,
    },
    /// List years for a make and model.
    Years {
        make: String,
        model: String,
    },
    /// Seat rows for a vehicle.
    SeatRows {
        make: String,
        model: String,
        year: String,
    },
}

/// Arguments for the select command.
#[derive(Args)]
pub struct SelectArgs {
    /// Product ID to record the vehicle against.
    pub product: String,

    /// Product title, as shown on the product page.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Quantity; prompted for when omitted.
    #[arg(short, long)]
    pub quantity: Option<String>,

    /// The product offers a third-row option.
    #[arg(long)]
    pub third_row: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
