//! # Cart Commands
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  add   ┌──────────┐  update / add   ┌──────────┐         │
//! │  │  Empty   │───────►│ 1 item   │────────────────►│ N items  │         │
//! │  │  Cart    │        │          │◄────────────────│          │         │
//! │  └──────────┘        └──────────┘     remove      └──────────┘         │
//! │       ▲                   │                                             │
//! │       └──── remove ───────┘                                             │
//! │                                                                         │
//! │  Every transition is persisted before the command prints the cart.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kart_core::{Cart, CartItem, CartTotals, ProductId};
use kart_store::CartHandle;
use serde::Serialize;
use tracing::debug;

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            totals: cart.totals(),
        }
    }
}

/// Gets the current cart contents.
pub async fn show(handle: &CartHandle) -> CartResponse {
    debug!("show command");
    handle.with_store(|store| CartResponse::from(store.cart())).await
}

/// Adds one unit of a product.
///
/// ## User Workflow
/// ```text
/// $ kart add 1
/// { "items": [{ "id": 1, "name": "...", "amount": 1, ... }], "totals": {...} }
///
/// $ kart add 1        (stock for 1 is already in the cart)
/// ✖ Requested quantity exceeds stock          ◄── stderr
/// { "items": [{ "id": 1, ..., "amount": 5 }], ... }   ◄── unchanged cart
/// ```
pub async fn add(handle: &CartHandle, id: ProductId) -> CartResponse {
    debug!(product_id = %id, "add command");
    handle.add_product(id).await;
    show(handle).await
}

/// Removes a product from the cart.
pub async fn remove(handle: &CartHandle, id: ProductId) -> CartResponse {
    debug!(product_id = %id, "remove command");
    handle.remove_product(id).await;
    show(handle).await
}

/// Sets the amount of a product already in the cart.
pub async fn update(handle: &CartHandle, id: ProductId, amount: i64) -> CartResponse {
    debug!(product_id = %id, amount, "update command");
    handle.update_product_amount(id, amount).await;
    show(handle).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use kart_core::{Money, Product};
    use kart_store::{CartStore, MemoryCatalog, MemoryNotifier, MemoryStorage};
    use std::sync::Arc;

    fn handle() -> (CartHandle, Arc<MemoryNotifier>) {
        let catalog = Arc::new(MemoryCatalog::new().with_product(
            Product {
                id: ProductId::new(7),
                name: "Tênis VR Caminhada Confortável Detalhes Couro Masculino".to_string(),
                price: Money::from_cents(13990),
                image_url: "https://cdn.example.com/7.jpg".to_string(),
            },
            2,
        ));
        let notifier = Arc::new(MemoryNotifier::new());
        let store = CartStore::open(
            catalog.clone(),
            catalog,
            Arc::new(MemoryStorage::new()),
            notifier.clone(),
        )
        .unwrap();

        (CartHandle::new(store), notifier)
    }

    #[tokio::test]
    async fn test_commands_return_resulting_cart() {
        let (handle, notifier) = handle();
        let id = ProductId::new(7);

        let response = add(&handle, id).await;
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.totals.subtotal_cents, 13990);

        let response = update(&handle, id, 2).await;
        assert_eq!(response.items[0].amount, 2);
        assert_eq!(response.totals.total_quantity, 2);

        let response = add(&handle, id).await;
        assert_eq!(response.items[0].amount, 2);
        assert_eq!(notifier.count(), 1);

        let response = remove(&handle, id).await;
        assert!(response.items.is_empty());
        assert_eq!(response.totals.subtotal_cents, 0);
    }

    #[tokio::test]
    async fn test_response_json_shape() {
        let (handle, _) = handle();
        let response = add(&handle, ProductId::new(7)).await;

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["items"][0]["id"], 7);
        assert_eq!(json["items"][0]["amount"], 1);
        assert_eq!(json["items"][0]["price"], 13990);
        assert!(json["items"][0]["imageUrl"].is_string());
        assert_eq!(json["totals"]["itemCount"], 1);
        assert_eq!(json["totals"]["subtotalCents"], 13990);
    }
}
