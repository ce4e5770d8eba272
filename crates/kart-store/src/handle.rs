//! # Cart Handle
//!
//! Cloneable handle to one [`CartStore`], built once per session and handed
//! to every consumer that needs the cart.
//!
//! ## Why tokio's Mutex?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_product holds the store across the stock/catalog lookups:         │
//! │                                                                         │
//! │   lock ──► stock(id).await ──► product(id).await ──► persist ──► unlock│
//! │                                                                         │
//! │  std::sync::Mutex can't be held across .await, tokio's can. A second   │
//! │  caller waits for the first operation to finish, so every operation    │
//! │  sees the cart the previous one left behind.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use kart_core::{Cart, CartTotals, ProductId};
use tokio::sync::Mutex;

use crate::store::{CartStore, Outcome};

/// Shared access to a [`CartStore`].
#[derive(Debug, Clone)]
pub struct CartHandle {
    store: Arc<Mutex<CartStore>>,
}

impl CartHandle {
    pub fn new(store: CartStore) -> Self {
        CartHandle {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Copy of the current cart.
    pub async fn cart(&self) -> Cart {
        self.store.lock().await.cart().clone()
    }

    pub async fn totals(&self) -> CartTotals {
        self.store.lock().await.totals()
    }

    /// Executes a function with read access to the store.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let count = handle.with_store(|store| store.cart().len()).await;
    /// ```
    pub async fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartStore) -> R,
    {
        let guard = self.store.lock().await;
        f(&guard)
    }

    pub async fn add_product(&self, id: ProductId) -> Outcome {
        self.store.lock().await.add_product(id).await
    }

    pub async fn remove_product(&self, id: ProductId) -> Outcome {
        self.store.lock().await.remove_product(id)
    }

    pub async fn update_product_amount(&self, id: ProductId, amount: i64) -> Outcome {
        self.store.lock().await.update_product_amount(id, amount).await
    }
}
