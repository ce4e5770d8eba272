//! Kart CLI entry point.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! kart show
//!
//! # Add one unit of product 1
//! kart add 1
//!
//! # Set product 1 to 3 units
//! kart update 1 3
//!
//! # Remove product 1
//! kart remove 1
//!
//! # List stock from the backend
//! kart stock
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::Parser;
use kart_cli::cli::Cli;

#[tokio::main]
async fn main() {
    kart_cli::init_tracing();

    let cli = Cli::parse();

    if let Err(e) = kart_cli::run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}
