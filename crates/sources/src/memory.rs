//! In-memory product source.
//!
//! Serves a fixed product list, or fails every request. Used by tests and
//! by callers that already hold the products.

use crate::error::{Result, SourceError};
use crate::traits::ProductSource;
use catalog::{Product, ProductId};

/// Product source serving a fixed collection.
#[derive(Debug, Clone)]
pub struct StaticProductSource {
    products: Vec<Product>,
    failure: Option<String>,
}

impl StaticProductSource {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            failure: None,
        }
    }

    /// A source that is always unavailable with the given reason.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            products: Vec::new(),
            failure: Some(reason.into()),
        }
    }

    fn check(&self) -> Result<()> {
        match &self.failure {
            Some(reason) => Err(SourceError::Transport(reason.clone())),
            None => Ok(()),
        }
    }
}

impl ProductSource for StaticProductSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_products(&self) -> Result<Vec<Product>> {
        self.check()?;
        Ok(self.products.clone())
    }

    async fn fetch_product(&self, id: ProductId) -> Result<Option<Product>> {
        self.check()?;
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }
}
