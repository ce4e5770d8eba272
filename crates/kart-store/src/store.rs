//! # Cart Store
//!
//! The single owner of the cart. Every mutation goes through one of three
//! operations, and each operation is one transaction:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Operation Transaction                                │
//! │                                                                         │
//! │   add_product / remove_product / update_product_amount                 │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   ┌────────────────────┐   Err    ┌──────────────────────────────┐     │
//! │   │ plan next Cart     │────────► │ notify once, cart untouched  │     │
//! │   │ (lookups + rules)  │          │ → Outcome::Rejected(err)     │     │
//! │   └─────────┬──────────┘          └──────────────────────────────┘     │
//! │             │ Ok(next)                          ▲                       │
//! │             ▼                                   │ Err                   │
//! │   ┌────────────────────┐                        │                       │
//! │   │ persist snapshot   │────────────────────────┘                       │
//! │   └─────────┬──────────┘                                                │
//! │             │ Ok                                                        │
//! │             ▼                                                           │
//! │   swap next Cart in → Outcome::Applied                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Operations never return an error to the caller. The shopper learns about
//! a rejection through the [`Notifier`]; the returned [`Outcome`] is for
//! callers that want to branch on it.

use std::fmt;
use std::sync::Arc;

use kart_core::validation::{validate_positive_amount, validate_quantity};
use kart_core::{
    Cart, CartError, CartItem, CartResult, CartTotals, ProductId, OUT_OF_STOCK_MESSAGE,
};
use tracing::{debug, info, warn};

use crate::error::{SourceError, StoreError, StoreResult};
use crate::notifier::Notifier;
use crate::persistence::Persistence;
use crate::sources::{CatalogSource, StockSource};

// =============================================================================
// Operation & Outcome
// =============================================================================

/// The three cart operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
    UpdateAmount,
}

impl Operation {
    /// Message shown for any rejection that isn't out-of-stock.
    pub const fn failure_message(&self) -> &'static str {
        match self {
            Operation::Add => "Error adding product",
            Operation::Remove => "Error removing product",
            Operation::UpdateAmount => "Error updating product quantity",
        }
    }

    /// Message shown for a specific rejection.
    pub fn message_for(&self, err: &CartError) -> &'static str {
        if err.is_out_of_stock() {
            OUT_OF_STOCK_MESSAGE
        } else {
            self.failure_message()
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Add => "add_product",
            Operation::Remove => "remove_product",
            Operation::UpdateAmount => "update_product_amount",
        };
        f.write_str(name)
    }
}

/// Result of a cart operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The cart changed and the new snapshot was persisted.
    Applied,
    /// Nothing changed; the shopper was notified.
    Rejected(CartError),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    pub fn error(&self) -> Option<&CartError> {
        match self {
            Outcome::Applied => None,
            Outcome::Rejected(err) => Some(err),
        }
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// Owns the cart and its collaborators.
///
/// Mutations take `&mut self`, so two operations on one store can never
/// interleave. Share a store between tasks through
/// [`CartHandle`](crate::CartHandle).
pub struct CartStore {
    cart: Cart,
    stock: Arc<dyn StockSource>,
    catalog: Arc<dyn CatalogSource>,
    storage: Arc<dyn Persistence>,
    notifier: Arc<dyn Notifier>,
}

impl CartStore {
    /// Builds a store from the persisted snapshot.
    ///
    /// ## Returns
    /// - Empty cart when nothing was saved yet
    /// - Empty cart (with a warning) when the stored data is corrupted
    /// - `Err` only when storage can't be read at all
    pub fn open(
        stock: Arc<dyn StockSource>,
        catalog: Arc<dyn CatalogSource>,
        storage: Arc<dyn Persistence>,
        notifier: Arc<dyn Notifier>,
    ) -> StoreResult<Self> {
        let cart = match storage.load() {
            Ok(Some(raw)) => Cart::from_snapshot(&raw).unwrap_or_else(|err| {
                warn!(error = %err, "Discarding corrupted cart snapshot");
                Cart::new()
            }),
            Ok(None) => Cart::new(),
            Err(StoreError::Corrupted(reason)) => {
                warn!(%reason, "Storage is corrupted, starting with an empty cart");
                Cart::new()
            }
            Err(err) => return Err(err),
        };

        info!(items = cart.len(), "Cart store opened");

        Ok(CartStore {
            cart,
            stock,
            catalog,
            storage,
            notifier,
        })
    }

    /// Current cart (read-only).
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    /// Adds one unit of a product.
    ///
    /// ## Flow
    /// ```text
    /// stock(id) ──► candidate = current + 1 (or 1)
    ///                   │
    ///                   ▼
    ///         1 ≤ candidate ≤ stock ? ──no──► "Requested quantity exceeds stock"
    ///                   │ yes
    ///                   ▼
    ///      in cart? ──yes──► set amount
    ///          │ no
    ///          ▼
    ///      product(id) ──► append at the end
    /// ```
    pub async fn add_product(&mut self, id: ProductId) -> Outcome {
        debug!(product_id = %id, "add_product");
        let planned = self.plan_add(id).await;
        self.commit(Operation::Add, id, planned)
    }

    /// Removes a product from the cart entirely.
    pub fn remove_product(&mut self, id: ProductId) -> Outcome {
        debug!(product_id = %id, "remove_product");
        let planned = self.plan_remove(id);
        self.commit(Operation::Remove, id, planned)
    }

    /// Sets the amount of a product already in the cart.
    pub async fn update_product_amount(&mut self, id: ProductId, amount: i64) -> Outcome {
        debug!(product_id = %id, amount, "update_product_amount");
        let planned = self.plan_update(id, amount).await;
        self.commit(Operation::UpdateAmount, id, planned)
    }

    // =========================================================================
    // Planning (no side effects)
    // =========================================================================

    async fn plan_add(&self, id: ProductId) -> CartResult<Cart> {
        let stock = self.stock.stock(id).await?;
        let candidate = self
            .cart
            .candidate_add_amount(id)
            .ok_or(CartError::OutOfStock {
                product_id: id,
                available: stock.amount,
                requested: i64::MAX,
            })?;
        validate_quantity(id, candidate, stock.amount)?;

        let mut next = self.cart.clone();
        if next.contains(id) {
            next.set_amount(id, candidate)?;
        } else {
            let product = self.catalog.product(id).await?;
            if product.id != id {
                return Err(SourceError::unavailable(format!(
                    "catalog returned product {} for {}",
                    product.id, id
                ))
                .into());
            }
            next.push(CartItem::new(product, candidate))?;
        }

        Ok(next)
    }

    fn plan_remove(&self, id: ProductId) -> CartResult<Cart> {
        let mut next = self.cart.clone();
        next.remove(id)?;
        Ok(next)
    }

    async fn plan_update(&self, id: ProductId, amount: i64) -> CartResult<Cart> {
        validate_positive_amount(amount)?;
        if !self.cart.contains(id) {
            return Err(CartError::not_found("Cart item", id));
        }

        let stock = self.stock.stock(id).await?;
        validate_quantity(id, amount, stock.amount)?;

        let mut next = self.cart.clone();
        next.set_amount(id, amount)?;
        Ok(next)
    }

    // =========================================================================
    // Commit
    // =========================================================================

    fn commit(&mut self, op: Operation, id: ProductId, planned: CartResult<Cart>) -> Outcome {
        match planned.and_then(|next| self.persist(next)) {
            Ok(()) => {
                info!(
                    operation = %op,
                    product_id = %id,
                    amount = ?self.cart.amount_of(id),
                    items = self.cart.len(),
                    "Cart updated"
                );
                Outcome::Applied
            }
            Err(err) => {
                let message = op.message_for(&err);
                warn!(operation = %op, product_id = %id, error = %err, "Cart operation rejected");
                self.notifier.notify_error(message);
                Outcome::Rejected(err)
            }
        }
    }

    fn persist(&mut self, next: Cart) -> CartResult<()> {
        let raw = next.to_snapshot()?;
        self.storage.save(&raw)?;
        self.cart = next;
        Ok(())
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
