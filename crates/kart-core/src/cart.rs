//! # Cart
//!
//! The ordered cart collection and the pure rules that change it.
//!
//! ## Reconciliation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Merging an "add" into the cart                       │
//! │                                                                         │
//! │  candidate_add_amount(id)                                               │
//! │       │                                                                 │
//! │       ├── id already in cart → existing amount + 1 (None on overflow)   │
//! │       └── id not in cart     → 1                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_quantity(id, candidate, stock limit)                          │
//! │       │                                                                 │
//! │       ├── outside [1, limit] → OutOfStock, cart untouched               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  set_amount(id, candidate)   or   push(CartItem::new(product, 1))       │
//! │                                   (appended: insertion order is kept)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Items are unique by product id
//! - Every amount is >= 1 (the stock upper bound is enforced by callers,
//!   since only they can see the stock source)
//! - Order is first-added order

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CartError, CartResult, ValidationError};
use crate::money::Money;
use crate::types::{CartItem, ProductId};
use crate::validation::validate_cart_items;
use crate::SNAPSHOT_VERSION;

/// The shopping cart.
///
/// Serializes as a plain item list for display. There is no `Deserialize`;
/// decoding goes through [`Cart::from_snapshot`], which checks the
/// invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from already-ordered items, checking the invariants.
    pub fn from_items(items: Vec<CartItem>) -> CartResult<Self> {
        validate_cart_items(&items)?;
        Ok(Cart { items })
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id() == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Current amount of a product, if present.
    pub fn amount_of(&self, id: ProductId) -> Option<i64> {
        self.get(id).map(|i| i.amount)
    }

    /// Quantity an "add one" request would result in.
    ///
    /// `None` when the current amount is already `i64::MAX`; no stock limit
    /// can admit one more.
    pub fn candidate_add_amount(&self, id: ProductId) -> Option<i64> {
        match self.amount_of(id) {
            Some(amount) => amount.checked_add(1),
            None => Some(1),
        }
    }

    /// Appends a new item at the end of the cart.
    ///
    /// ## Returns
    /// - `Err(CartError::Validation)` if the product is already in the cart
    ///   or the amount is below 1
    pub fn push(&mut self, item: CartItem) -> CartResult<()> {
        if self.contains(item.id()) {
            return Err(ValidationError::Duplicate {
                field: "product id".to_string(),
                value: item.id().to_string(),
            }
            .into());
        }
        if item.amount < 1 {
            return Err(ValidationError::MustBePositive {
                field: "amount".to_string(),
            }
            .into());
        }

        self.items.push(item);
        Ok(())
    }

    /// Replaces the amount of an existing item. Position is unchanged.
    pub fn set_amount(&mut self, id: ProductId, amount: i64) -> CartResult<()> {
        if amount < 1 {
            return Err(ValidationError::MustBePositive {
                field: "amount".to_string(),
            }
            .into());
        }

        let item = self
            .items
            .iter_mut()
            .find(|i| i.id() == id)
            .ok_or_else(|| CartError::not_found("Cart item", id))?;
        item.amount = amount;
        Ok(())
    }

    /// Removes an item by product id, returning it.
    pub fn remove(&mut self, id: ProductId) -> CartResult<CartItem> {
        let index = self
            .items
            .iter()
            .position(|i| i.id() == id)
            .ok_or_else(|| CartError::not_found("Cart item", id))?;
        Ok(self.items.remove(index))
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all amounts (the badge number in the header).
    pub fn total_quantity(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |total, i| total.saturating_add(i.amount))
    }

    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }

    // =========================================================================
    // Snapshot Codec
    // =========================================================================

    /// Serializes the cart into its persisted form.
    ///
    /// ## Format
    /// ```json
    /// { "version": 1, "items": [ { "id": 1, "amount": 2, ... } ] }
    /// ```
    pub fn to_snapshot(&self) -> CartResult<String> {
        let envelope = SnapshotRef {
            version: SNAPSHOT_VERSION,
            items: &self.items,
        };
        serde_json::to_string(&envelope).map_err(|e| CartError::Snapshot(e.to_string()))
    }

    /// Rebuilds a cart from its persisted form.
    ///
    /// Fails with `CartError::Snapshot` on malformed JSON, an unknown version,
    /// or items that break the cart invariants.
    pub fn from_snapshot(raw: &str) -> CartResult<Self> {
        let envelope: SnapshotOwned =
            serde_json::from_str(raw).map_err(|e| CartError::Snapshot(e.to_string()))?;

        if envelope.version != SNAPSHOT_VERSION {
            return Err(CartError::Snapshot(format!(
                "unsupported snapshot version {}",
                envelope.version
            )));
        }

        Cart::from_items(envelope.items).map_err(|e| CartError::Snapshot(e.to_string()))
    }
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    items: &'a [CartItem],
}

#[derive(Deserialize)]
struct SnapshotOwned {
    version: u32,
    items: Vec<CartItem>,
}

/// Cart totals summary for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub subtotal_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.len(),
            total_quantity: cart.total_quantity(),
            subtotal_cents: cart.subtotal().cents(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;
    use crate::validation::validate_quantity;

    fn test_product(id: u64, price_cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {}", id),
            price: Money::from_cents(price_cents),
            image_url: format!("https://cdn.example.com/{}.jpg", id),
        }
    }

    /// Mirrors what the store does for one "add", minus the I/O.
    fn add_one(cart: &mut Cart, product: &Product, limit: i64) -> CartResult<()> {
        let candidate = cart.candidate_add_amount(product.id).unwrap();
        validate_quantity(product.id, candidate, limit)?;
        if cart.contains(product.id) {
            cart.set_amount(product.id, candidate)
        } else {
            cart.push(CartItem::new(product.clone(), candidate))
        }
    }

    #[test]
    fn test_candidate_add_amount() {
        let mut cart = Cart::new();
        let id = ProductId::new(1);
        assert_eq!(cart.candidate_add_amount(id), Some(1));

        cart.push(CartItem::new(test_product(1, 100), 3)).unwrap();
        assert_eq!(cart.candidate_add_amount(id), Some(4));
    }

    #[test]
    fn test_candidate_add_amount_at_max_amount() {
        let cart = Cart::from_items(vec![CartItem::new(test_product(1, 100), i64::MAX)]).unwrap();
        assert_eq!(cart.candidate_add_amount(ProductId::new(1)), None);
    }

    #[test]
    fn test_add_until_stock_limit() {
        let mut cart = Cart::new();
        let product = test_product(1, 17990);

        for _ in 0..5 {
            add_one(&mut cart, &product, 5).unwrap();
        }
        assert_eq!(cart.amount_of(product.id), Some(5));

        let before = cart.clone();
        let err = add_one(&mut cart, &product, 5).unwrap_err();
        assert!(err.is_out_of_stock());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_push_keeps_insertion_order_and_rejects_duplicates() {
        let mut cart = Cart::new();
        cart.push(CartItem::new(test_product(3, 100), 1)).unwrap();
        cart.push(CartItem::new(test_product(1, 100), 1)).unwrap();
        cart.push(CartItem::new(test_product(2, 100), 1)).unwrap();

        let ids: Vec<u64> = cart.items().iter().map(|i| i.id().get()).collect();
        assert_eq!(ids, vec![3, 1, 2]);

        let err = cart.push(CartItem::new(test_product(1, 100), 1)).unwrap_err();
        assert!(matches!(err, CartError::Validation(ValidationError::Duplicate { .. })));
        assert_eq!(cart.len(), 3);
    }

    #[test]
    fn test_set_amount_keeps_position() {
        let mut cart = Cart::new();
        cart.push(CartItem::new(test_product(1, 100), 1)).unwrap();
        cart.push(CartItem::new(test_product(2, 100), 1)).unwrap();

        cart.set_amount(ProductId::new(1), 4).unwrap();

        assert_eq!(cart.items()[0].id(), ProductId::new(1));
        assert_eq!(cart.items()[0].amount, 4);
        assert!(cart.set_amount(ProductId::new(9), 1).is_err());
        assert!(cart.set_amount(ProductId::new(1), 0).is_err());
        assert_eq!(cart.amount_of(ProductId::new(1)), Some(4));
    }

    #[test]
    fn test_remove_leaves_others_untouched() {
        let mut cart = Cart::new();
        cart.push(CartItem::new(test_product(1, 100), 2)).unwrap();
        cart.push(CartItem::new(test_product(2, 100), 3)).unwrap();

        let removed = cart.remove(ProductId::new(1)).unwrap();
        assert_eq!(removed.amount, 2);
        assert!(!cart.contains(ProductId::new(1)));
        assert_eq!(cart.amount_of(ProductId::new(2)), Some(3));

        let err = cart.remove(ProductId::new(1)).unwrap_err();
        assert!(matches!(err, CartError::NotFound { .. }));
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.push(CartItem::new(test_product(1, 999), 2)).unwrap();
        cart.push(CartItem::new(test_product(2, 1), 3)).unwrap();

        let totals = cart.totals();
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_quantity, 5);
        assert_eq!(totals.subtotal_cents, 2001);
    }

    #[test]
    fn test_snapshot_round_trip_preserves_order_and_amounts() {
        let mut cart = Cart::new();
        cart.push(CartItem::new(test_product(2, 13990), 1)).unwrap();
        cart.push(CartItem::new(test_product(1, 17990), 4)).unwrap();

        let raw = cart.to_snapshot().unwrap();
        let restored = Cart::from_snapshot(&raw).unwrap();

        assert_eq!(restored, cart);
    }

    #[test]
    fn test_snapshot_rejects_bad_input() {
        assert!(matches!(
            Cart::from_snapshot("not json"),
            Err(CartError::Snapshot(_))
        ));
        assert!(matches!(
            Cart::from_snapshot(r#"{"version":99,"items":[]}"#),
            Err(CartError::Snapshot(_))
        ));

        let dup = r#"{"version":1,"items":[
            {"id":1,"name":"a","price":100,"imageUrl":"","amount":1,"addedAt":"2024-01-01T00:00:00Z"},
            {"id":1,"name":"a","price":100,"imageUrl":"","amount":2,"addedAt":"2024-01-01T00:00:00Z"}
        ]}"#;
        assert!(matches!(Cart::from_snapshot(dup), Err(CartError::Snapshot(_))));
    }

    #[test]
    fn test_empty_snapshot() {
        let cart = Cart::from_snapshot(r#"{"version":1,"items":[]}"#).unwrap();
        assert!(cart.is_empty());
    }
}
