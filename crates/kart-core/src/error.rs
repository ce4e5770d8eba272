//! # Error Types
//!
//! Domain-specific error types for kart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kart-core errors (this file)                                          │
//! │  ├── CartError        - Why a cart operation did not apply             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  kart-store errors (separate crate)                                    │
//! │  ├── SourceError      - Stock/catalog lookup failures                  │
//! │  └── StoreError       - Persistence failures                           │
//! │                                                                         │
//! │  Flow: SourceError/StoreError → CartError → Notifier message           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, amounts)
//! 3. Errors are enum variants, never String
//! 4. Only `OutOfStock` has its own user-facing message; every other
//!    variant collapses into the operation's generic failure message

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Cart Error
// =============================================================================

/// Reasons a cart operation can be rejected.
///
/// These never escape an operation as a failure: the Cart Store catches them
/// at the operation boundary and turns each into exactly one notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Referenced product, stock entry or cart entry is absent.
    ///
    /// ## When This Occurs
    /// - Adding a product the stock source doesn't know
    /// - Removing or updating a product that isn't in the cart
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Requested quantity is outside `[1, stock limit]`.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart (cart already has 5)
    ///      │
    ///      ▼
    /// Check stock: available=5
    ///      │
    ///      ▼
    /// OutOfStock { product_id: 1, available: 5, requested: 6 }
    ///      │
    ///      ▼
    /// UI shows: "Requested quantity exceeds stock"
    /// ```
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    OutOfStock {
        product_id: ProductId,
        available: i64,
        requested: i64,
    },

    /// Stock or catalog lookup failed (network-style error).
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    /// Input that is invalid regardless of stock (wraps ValidationError).
    ///
    /// ## When This Occurs
    /// - `update_product_amount` with an amount <= 0
    /// - Inserting a second entry for a product already in the cart
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The new snapshot could not be written.
    #[error("Persistence failed: {0}")]
    Persistence(String),

    /// A persisted snapshot could not be decoded.
    #[error("Snapshot is corrupted: {0}")]
    Snapshot(String),
}

impl CartError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        CartError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Whether this error carries the dedicated out-of-stock message.
    pub fn is_out_of_stock(&self) -> bool {
        matches!(self, CartError::OutOfStock { .. })
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before any stock lookup runs, and for checking
/// decoded snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., malformed price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., two cart entries for one product).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CartError::OutOfStock {
            product_id: ProductId::new(1),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product 1: available 3, requested 5"
        );

        let err = CartError::not_found("Product", ProductId::new(42));
        assert_eq!(err.to_string(), "Product not found: 42");
    }

    #[test]
    fn test_validation_converts_to_cart_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "amount".to_string(),
        };
        let cart_err: CartError = validation_err.into();
        assert!(matches!(cart_err, CartError::Validation(_)));
        assert!(!cart_err.is_out_of_stock());
    }
}
