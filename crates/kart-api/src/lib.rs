//! # kart-api: HTTP Stock & Catalog Source
//!
//! REST client implementing [`StockSource`](kart_store::StockSource) and
//! [`CatalogSource`](kart_store::CatalogSource).
//!
//! ## Wire Format
//! ```text
//! GET /stock/1     {"id": 1, "amount": 3}
//! GET /products/1  {"id": 1, "title": "Tênis de Caminhada", "price": 179.9,
//!                   "image": "https://..."}
//!                        │            │                │
//!                        ▼            ▼                ▼
//!                  Product.name  Product.price    Product.image_url
//!                               (Money, cents)
//! ```

pub mod client;
pub mod dto;
pub mod error;

pub use client::{parse_base_url, ApiClient};
pub use dto::ApiProduct;
pub use error::{ApiError, ApiResult};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3333";

/// Request timeout in seconds used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
