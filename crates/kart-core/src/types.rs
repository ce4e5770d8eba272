//! # Domain Types
//!
//! Core domain types used throughout Kart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   StockEntry    │   │    CartItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  Product (flat) │       │
//! │  │  name           │   │  amount (max)   │   │  amount         │       │
//! │  │  price (Money)  │   └─────────────────┘   │  added_at       │       │
//! │  │  image_url      │                         └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  Product comes from the catalog source, StockEntry from the stock      │
//! │  source. A CartItem freezes the Product it was created from; only      │
//! │  its amount changes afterwards.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product Id
// =============================================================================

/// Catalog identifier of a product. Serializes as a bare JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ProductId(#[ts(type = "number")] u64);

impl ProductId {
    #[inline]
    pub const fn new(id: u64) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Product
// =============================================================================

/// Product display data as returned by the catalog source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,

    /// Display name shown on the product card and in the cart.
    pub name: String,

    /// Unit price.
    pub price: Money,

    /// Absolute URL of the product image.
    pub image_url: String,
}

// =============================================================================
// Stock Entry
// =============================================================================

/// Maximum purchasable quantity of one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockEntry {
    pub id: ProductId,

    /// Upper bound for the cart amount of this product.
    pub amount: i64,
}

impl StockEntry {
    pub const fn new(id: ProductId, amount: i64) -> Self {
        StockEntry { id, amount }
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A product in the cart together with the selected quantity.
///
/// ## Snapshot Pattern
/// The product fields are a frozen copy taken at the moment the item was
/// first added. If the catalog later changes the name or price, the cart
/// keeps showing what the shopper picked.
///
/// Serialized flat: `{"id":1,"name":"..","price":17990,"imageUrl":"..","amount":2,"addedAt":".."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,

    /// Quantity in cart. Always within `[1, stock limit]` when committed.
    pub amount: i64,

    /// When this product first entered the cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a new cart item from catalog data.
    pub fn new(product: Product, amount: i64) -> Self {
        CartItem {
            product,
            amount,
            added_at: Utc::now(),
        }
    }

    #[inline]
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price × amount.
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.amount)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
