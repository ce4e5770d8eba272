//! # kart-store: Cart Store Service for Kart
//!
//! This crate turns the pure rules in `kart-core` into a running cart: it
//! consults the stock and catalog sources, applies the rules, persists the
//! result and tells the shopper when something was rejected.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kart Data Flow                                   │
//! │                                                                         │
//! │  Caller (CLI / front-end binding)                                      │
//! │       │  handle.add_product(id)                                        │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     kart-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  CartHandle   │───►│   CartStore   │───►│ Persistence  │  │   │
//! │  │   │ (Arc<Mutex>)  │    │ add / remove  │    │ Memory, File │  │   │
//! │  │   └───────────────┘    │ update amount │    └──────────────┘  │   │
//! │  │                        └───────┬───────┘                       │   │
//! │  │                   ┌────────────┼─────────────┐                 │   │
//! │  │                   ▼            ▼             ▼                 │   │
//! │  │            StockSource   CatalogSource    Notifier             │   │
//! │  │            (trait)       (trait)          (trait)              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  kart-api (HTTP) or MemoryCatalog (tests, demos)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The Cart Store and its three operations
//! - [`handle`] - Shared, injectable handle around a store
//! - [`sources`] - Stock and catalog source traits, in-memory implementation
//! - [`persistence`] - Snapshot storage trait, in-memory and file-backed
//! - [`notifier`] - User notification trait and implementations
//! - [`error`] - Source and storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use kart_store::{CartHandle, CartStore, FileStorage, TracingNotifier};
//!
//! let storage = Arc::new(FileStorage::new("storage.json", "cart"));
//! let store = CartStore::open(source.clone(), source, storage, Arc::new(TracingNotifier))?;
//! let handle = CartHandle::new(store);
//!
//! handle.add_product(ProductId::new(1)).await;
//! ```

pub mod error;
pub mod handle;
pub mod notifier;
pub mod persistence;
pub mod sources;
pub mod store;

pub use error::{SourceError, SourceResult, StoreError, StoreResult};
pub use handle::CartHandle;
pub use notifier::{MemoryNotifier, Notifier, TracingNotifier};
pub use persistence::{FileStorage, MemoryStorage, Persistence};
pub use sources::memory::MemoryCatalog;
pub use sources::{CatalogSource, StockSource};
pub use store::{CartStore, Operation, Outcome};
