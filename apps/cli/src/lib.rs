//! # Kart CLI
//!
//! Wires the Kart crates together and runs one command per invocation.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Application Startup                                │
//! │                                                                         │
//! │  1. Initialize Tracing (stderr)                                        │
//! │     └── RUST_LOG or "info,kart=debug"                                  │
//! │                                                                         │
//! │  2. Load Config                                                        │
//! │     └── defaults → kart.toml → KART_* env → validate                   │
//! │                                                                         │
//! │  3. Build Collaborators                                                │
//! │     ├── ApiClient   (stock + catalog)                                  │
//! │     ├── FileStorage (snapshot under storage.key)                       │
//! │     └── ConsoleNotifier                                                │
//! │                                                                         │
//! │  4. Open CartStore → CartHandle                                        │
//! │                                                                         │
//! │  5. Run Command → JSON on stdout                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod notifier;

use std::sync::Arc;

use kart_api::ApiClient;
use kart_core::ProductId;
use kart_store::{CartHandle, CartStore, FileStorage};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::config::KartConfig;
use crate::error::AppResult;
use crate::notifier::ConsoleNotifier;

/// Runs one CLI invocation.
pub async fn run(cli: Cli) -> AppResult<()> {
    let config = KartConfig::load(cli.config)?;
    let source = Arc::new(ApiClient::new(&config.api.base_url, config.timeout())?);

    match cli.command {
        Command::Stock => {
            let entries = commands::stock::list(&*source).await?;
            print_json(&entries)
        }
        Command::Show => {
            let handle = open_handle(&config, source)?;
            print_json(&commands::cart::show(&handle).await)
        }
        Command::Add { id } => {
            let handle = open_handle(&config, source)?;
            print_json(&commands::cart::add(&handle, ProductId::new(id)).await)
        }
        Command::Remove { id } => {
            let handle = open_handle(&config, source)?;
            print_json(&commands::cart::remove(&handle, ProductId::new(id)).await)
        }
        Command::Update { id, amount } => {
            let handle = open_handle(&config, source)?;
            print_json(&commands::cart::update(&handle, ProductId::new(id), amount).await)
        }
    }
}

/// Opens the persisted cart behind a shared handle.
fn open_handle(config: &KartConfig, source: Arc<ApiClient>) -> AppResult<CartHandle> {
    let storage_path = config.storage_path()?;
    info!(path = %storage_path.display(), key = %config.storage.key, "Opening cart storage");
    let storage = Arc::new(FileStorage::new(storage_path, config.storage.key.clone()));

    let store = CartStore::open(source.clone(), source, storage, Arc::new(ConsoleNotifier))?;
    Ok(CartHandle::new(store))
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - ERROR: Startup failures
/// - WARN: Rejected operations, recovered corruption
/// - INFO: Committed operations, startup
/// - DEBUG: Operation entry, HTTP requests
/// - TRACE: Very detailed debugging
///
/// Writes to stderr so stdout stays machine-readable.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,kart=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
