//! Stock listing.

use kart_core::StockEntry;
use kart_store::StockSource;
use tracing::debug;

use crate::error::AppResult;

/// Lists every stock entry the source knows about.
pub async fn list(source: &dyn StockSource) -> AppResult<Vec<StockEntry>> {
    debug!("stock command");
    Ok(source.all_stock().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kart_core::{Money, Product, ProductId};
    use kart_store::MemoryCatalog;

    #[tokio::test]
    async fn test_list_stock() {
        let catalog = MemoryCatalog::new().with_product(
            Product {
                id: ProductId::new(1),
                name: "Sneaker".to_string(),
                price: Money::from_cents(100),
                image_url: String::new(),
            },
            4,
        );

        let entries = list(&catalog).await.unwrap();
        assert_eq!(entries, vec![StockEntry::new(ProductId::new(1), 4)]);
    }

    #[tokio::test]
    async fn test_list_stock_source_down() {
        let catalog = MemoryCatalog::new();
        catalog.set_offline(true);

        let err = list(&catalog).await.unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::SourceError);
    }
}
