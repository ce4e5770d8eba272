//! # API Client
//!
//! `reqwest`-backed stock and catalog source.
//!
//! ## Status Mapping
//! ```text
//! ┌──────────────────────┬──────────────────────────────────────────────┐
//! │ Response             │ Result                                       │
//! ├──────────────────────┼──────────────────────────────────────────────┤
//! │ 2xx + valid JSON     │ Ok(value)                                    │
//! │ 404                  │ SourceError::NotFound { "Stock"/"Product" }  │
//! │ other status         │ SourceError::Unavailable                     │
//! │ timeout / refused    │ SourceError::Unavailable                     │
//! │ bad body             │ SourceError::Unavailable                     │
//! └──────────────────────┴──────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use kart_core::{Product, ProductId, StockEntry};
use kart_store::{CatalogSource, SourceError, SourceResult, StockSource};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::dto::ApiProduct;
use crate::error::{ApiError, ApiResult};

/// REST client for the stock/catalog backend.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL isn't an absolute http(s) URL with a
    /// host, or the HTTP client fails to build.
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base_url = parse_base_url(base_url)?;

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner { client, base_url }),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    fn url(&self, path: &str) -> ApiResult<Url> {
        self.inner
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Parse(format!("{path}: {e}")))
    }

    /// GET a JSON resource. `Ok(None)` on 404.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<Option<T>> {
        let url = self.url(path)?;
        debug!(%url, "GET");

        let response = self.inner.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .json()
            .await
            .map(Some)
            .map_err(|e| ApiError::Parse(format!("{url}: {e}")))
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Parses a backend base URL.
///
/// Accepts absolute `http`/`https` URLs with a host. The path always ends in
/// `/` so that joining `stock/1` keeps any prefix (`/api/` → `/api/stock/1`).
///
/// # Errors
///
/// Returns `ApiError::InvalidBaseUrl` for anything else.
pub fn parse_base_url(raw: &str) -> ApiResult<Url> {
    let invalid = || ApiError::InvalidBaseUrl(raw.to_string());

    let mut url = Url::parse(raw.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid());
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

#[async_trait]
impl StockSource for ApiClient {
    async fn stock(&self, id: ProductId) -> SourceResult<StockEntry> {
        let entry: StockEntry = self
            .get(&format!("stock/{id}"))
            .await?
            .ok_or_else(|| SourceError::not_found("Stock", id))?;

        if entry.id != id {
            return Err(SourceError::unavailable(format!(
                "stock lookup for {id} returned entry {}",
                entry.id
            )));
        }

        Ok(entry)
    }

    async fn all_stock(&self) -> SourceResult<Vec<StockEntry>> {
        let entries: Vec<StockEntry> = self
            .get("stock")
            .await?
            .ok_or_else(|| SourceError::unavailable("stock collection not found"))?;

        Ok(entries)
    }
}

#[async_trait]
impl CatalogSource for ApiClient {
    async fn product(&self, id: ProductId) -> SourceResult<Product> {
        let dto: ApiProduct = self
            .get(&format!("products/{id}"))
            .await?
            .ok_or_else(|| SourceError::not_found("Product", id))?;

        Ok(Product::try_from(dto)?)
    }
}
