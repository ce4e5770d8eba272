//! # CLI Commands
//!
//! One handler per subcommand. Handlers return serializable values; the
//! caller prints them.
//!
//! ```text
//! ┌──────────────┬─────────────────────────────┬──────────────────────────┐
//! │ Subcommand   │ Handler                     │ Output                   │
//! ├──────────────┼─────────────────────────────┼──────────────────────────┤
//! │ show         │ cart::show                  │ CartResponse             │
//! │ add <id>     │ cart::add                   │ CartResponse             │
//! │ remove <id>  │ cart::remove                │ CartResponse             │
//! │ update <id> n│ cart::update                │ CartResponse             │
//! │ stock        │ stock::list                 │ [StockEntry]             │
//! └──────────────┴─────────────────────────────┴──────────────────────────┘
//! ```

pub mod cart;
pub mod stock;
