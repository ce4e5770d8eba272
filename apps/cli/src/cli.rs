//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "kart")]
#[command(author, version, about = "Kart shopping cart")]
pub struct Cli {
    /// Config file (default: platform config dir/kart.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the cart and its totals
    Show,

    /// Add one unit of a product
    Add {
        /// Product id
        id: u64,
    },

    /// Remove a product from the cart
    Remove {
        /// Product id
        id: u64,
    },

    /// Set the amount of a product already in the cart
    Update {
        /// Product id
        id: u64,

        /// New amount (must be within stock)
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },

    /// List stock from the backend
    Stock,
}
