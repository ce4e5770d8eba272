//! # Validation Module
//!
//! Quantity and data rules for Kart.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Caller input                                                 │
//! │  └── validate_positive_amount: amount <= 0 is never acceptable         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Stock rule                                                   │
//! │  └── validate_quantity: 1 <= requested <= stock limit                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Data coming back in                                          │
//! │  ├── validate_price: catalog prices are never negative                 │
//! │  └── validate_cart_items: decoded snapshots keep the cart invariants   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::error::{CartError, CartResult, ValidationError};
use crate::money::Money;
use crate::types::{CartItem, ProductId};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Quantity Validators
// =============================================================================

/// Checks a requested cart quantity against the stock limit.
///
/// ## Rules
/// - `requested < 1` → OutOfStock
/// - `requested > limit` → OutOfStock
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart: "+" button on an item with amount 5, stock 5                     │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(id, 6, 5) ← THIS FUNCTION                            │
/// │       │                                                                 │
/// │       └── 6 > 5 → OutOfStock → "Requested quantity exceeds stock"       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// ## Example
/// ```rust
/// use kart_core::ProductId;
/// use kart_core::validation::validate_quantity;
///
/// let id = ProductId::new(1);
/// assert!(validate_quantity(id, 5, 5).is_ok());
/// assert!(validate_quantity(id, 6, 5).is_err());
/// assert!(validate_quantity(id, 0, 5).is_err());
/// ```
pub fn validate_quantity(product_id: ProductId, requested: i64, limit: i64) -> CartResult<()> {
    if requested < 1 || requested > limit {
        return Err(CartError::OutOfStock {
            product_id,
            available: limit,
            requested,
        });
    }

    Ok(())
}

/// Rejects amounts that can never be valid, before any stock lookup.
pub fn validate_positive_amount(amount: i64) -> ValidationResult<()> {
    if amount <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Data Validators
// =============================================================================

/// Validates a price received from the catalog.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a decoded list of cart items.
///
/// ## Rules
/// - Ids are unique
/// - Every amount is at least 1
pub fn validate_cart_items(items: &[CartItem]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(items.len());

    for item in items {
        if !seen.insert(item.id()) {
            return Err(ValidationError::Duplicate {
                field: "product id".to_string(),
                value: item.id().to_string(),
            });
        }
        if item.amount < 1 {
            return Err(ValidationError::MustBePositive {
                field: format!("amount of product {}", item.id()),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
