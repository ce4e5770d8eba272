//! In-memory stock and catalog source.
//!
//! Backs tests and offline demos. Stock and products are kept in separate
//! maps so a product can exist without stock (and the other way round),
//! which is how a half-seeded REST backend behaves too.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use kart_core::{Product, ProductId, StockEntry};

use super::{CatalogSource, StockSource};
use crate::error::{SourceError, SourceResult};

/// Stock and catalog data held in memory.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: RwLock<HashMap<ProductId, Product>>,
    stock: RwLock<HashMap<ProductId, i64>>,
    offline: AtomicBool,
    catalog_offline: AtomicBool,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: registers a product with its stock limit.
    pub fn with_product(self, product: Product, stock: i64) -> Self {
        self.set_stock(product.id, stock);
        self.insert_product(product);
        self
    }

    pub fn insert_product(&self, product: Product) {
        self.products
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(product.id, product);
    }

    pub fn set_stock(&self, id: ProductId, amount: i64) {
        self.stock
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, amount);
    }

    pub fn remove_stock(&self, id: ProductId) {
        self.stock
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
    }

    /// When offline, every lookup fails with `SourceError::Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Fails only product lookups; stock keeps answering.
    pub fn set_catalog_offline(&self, offline: bool) {
        self.catalog_offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> SourceResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(SourceError::unavailable("memory catalog is offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl StockSource for MemoryCatalog {
    async fn stock(&self, id: ProductId) -> SourceResult<StockEntry> {
        self.ensure_online()?;
        let stock = self.stock.read().unwrap_or_else(PoisonError::into_inner);
        stock
            .get(&id)
            .map(|amount| StockEntry::new(id, *amount))
            .ok_or_else(|| SourceError::not_found("Stock", id))
    }

    async fn all_stock(&self) -> SourceResult<Vec<StockEntry>> {
        self.ensure_online()?;
        let stock = self.stock.read().unwrap_or_else(PoisonError::into_inner);
        let mut entries: Vec<StockEntry> = stock
            .iter()
            .map(|(id, amount)| StockEntry::new(*id, *amount))
            .collect();
        entries.sort_by_key(|entry| entry.id);
        Ok(entries)
    }
}

#[async_trait]
impl CatalogSource for MemoryCatalog {
    async fn product(&self, id: ProductId) -> SourceResult<Product> {
        self.ensure_online()?;
        if self.catalog_offline.load(Ordering::SeqCst) {
            return Err(SourceError::unavailable("memory catalog is offline"));
        }
        let products = self.products.read().unwrap_or_else(PoisonError::into_inner);
        products
            .get(&id)
            .cloned()
            .ok_or_else(|| SourceError::not_found("Product", id))
    }
}
