//! HTTP product source.
//!
//! Talks to a fake-store style REST API:
//! - `GET /products` returns a JSON array of products
//! - `GET /products/{id}` returns one product, a 404, or an empty body
//!   for ids the API does not know

use crate::error::{Result, SourceError};
use crate::traits::ProductSource;
use catalog::{Product, ProductId, parser};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error, info};

/// Public demo API the storefront reads by default
pub const DEFAULT_BASE_URL: &str = "https://fakestoreapi.com";

/// Product source backed by a REST API.
///
/// Cloning is cheap: the underlying reqwest client is reference counted.
#[derive(Clone)]
pub struct HttpProductSource {
    client: Client,
    base_url: String,
}

impl HttpProductSource {
    /// Create a new HttpProductSource.
    ///
    /// # Arguments
    /// * `base_url` - API root (e.g., "https://fakestoreapi.com")
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    /// Get the API root this source reads from.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl ProductSource for HttpProductSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_products(&self) -> Result<Vec<Product>> {
        let url = self.url("/products");
        info!("Fetching product listing from {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!("Request to {} failed: {}", url, e);
            SourceError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("Product listing request returned {}", status);
            return Err(SourceError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.bytes().await?;
        let products = parser::parse_products(&body)?;
        debug!("Decoded {} products from {}", products.len(), url);
        Ok(products)
    }

    async fn fetch_product(&self, id: ProductId) -> Result<Option<Product>> {
        let url = self.url(&format!("/products/{}", id));
        debug!("Fetching product detail from {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!("Request to {} failed: {}", url, e);
            SourceError::from(e)
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            error!("Product detail request returned {}", status);
            return Err(SourceError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.bytes().await?;
        Ok(parser::parse_product(&body)?)
    }
}
