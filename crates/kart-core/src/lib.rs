//! # kart-core: Pure Cart Logic for Kart
//!
//! This crate is the **heart** of Kart. It contains the cart reconciliation
//! rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Kart Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront front-end / CLI                      │   │
//! │  │    Product List ──► Add to Cart ──► Cart Page (qty +/-)         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CartHandle                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 kart-store (Cart Store service)                 │   │
//! │  │    add_product, remove_product, update_product_amount           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kart-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  stock    │  │   │
//! │  │   │StockEntry │  │  parsing  │  │ Snapshot  │  │  limits   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, StockEntry, CartItem)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart collection and its snapshot codec
//! - [`error`] - Domain error types
//! - [`validation`] - Quantity rules
//!
//! ## Example Usage
//!
//! ```rust
//! use kart_core::{Cart, CartItem, Money, Product, ProductId};
//! use kart_core::validation::validate_quantity;
//!
//! let sneaker = Product {
//!     id: ProductId::new(1),
//!     name: "Running Sneaker".to_string(),
//!     price: Money::from_cents(17990),
//!     image_url: "https://cdn.example.com/sneaker.jpg".to_string(),
//! };
//!
//! let mut cart = Cart::new();
//! let amount = cart.candidate_add_amount(sneaker.id).unwrap();
//! validate_quantity(sneaker.id, amount, 5).unwrap();
//! cart.push(CartItem::new(sneaker, amount)).unwrap();
//!
//! assert_eq!(cart.amount_of(ProductId::new(1)), Some(1));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartTotals};
pub use error::{CartError, CartResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default storage key the cart snapshot is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// Current version of the persisted snapshot envelope.
///
/// Bump this when the `CartItem` layout changes in a way older snapshots
/// cannot be read as.
pub const SNAPSHOT_VERSION: u32 = 1;

/// The only quantity failure with its own user-facing message.
pub const OUT_OF_STOCK_MESSAGE: &str = "Requested quantity exceeds stock";
