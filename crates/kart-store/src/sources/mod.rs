//! # Sources
//!
//! Read-only collaborators the Cart Store queries on demand.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StockSource                        CatalogSource                       │
//! │  ├── stock(id)  → StockEntry        └── product(id) → Product           │
//! │  └── all_stock() → [StockEntry]         (display data, no amount)       │
//! │                                                                         │
//! │  Implementations:                                                       │
//! │  • MemoryCatalog (this crate)  - tests, demos, offline mode             │
//! │  • ApiClient (kart-api)        - json-server style REST API             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod memory;

use async_trait::async_trait;
use kart_core::{Product, ProductId, StockEntry};

use crate::error::SourceResult;

/// Provides the maximum purchasable quantity per product.
#[async_trait]
pub trait StockSource: Send + Sync {
    /// Stock entry for one product. `SourceError::NotFound` if unknown.
    async fn stock(&self, id: ProductId) -> SourceResult<StockEntry>;

    /// Every stock entry the source knows about.
    async fn all_stock(&self) -> SourceResult<Vec<StockEntry>>;
}

/// Provides product display data.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Display data for one product. `SourceError::NotFound` if unknown.
    async fn product(&self, id: ProductId) -> SourceResult<Product>;
}
