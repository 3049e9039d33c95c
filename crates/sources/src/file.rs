//! Offline product source backed by a JSON file.
//!
//! The file holds the same array `GET /products` returns, so a saved API
//! response can be replayed without network access.

use crate::error::{Result, SourceError};
use crate::traits::ProductSource;
use catalog::{Product, ProductId, parser};
use std::path::PathBuf;
use tracing::{error, info};

/// Reads the product listing from disk on every fetch.
#[derive(Debug, Clone)]
pub struct FileProductSource {
    path: PathBuf,
}

impl FileProductSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProductSource for FileProductSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch_products(&self) -> Result<Vec<Product>> {
        info!("Reading product listing from {}", self.path.display());
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            error!("Failed to read {}: {}", self.path.display(), e);
            SourceError::Transport(format!("{}: {}", self.path.display(), e))
        })?;
        Ok(parser::parse_products(&bytes)?)
    }

    async fn fetch_product(&self, id: ProductId) -> Result<Option<Product>> {
        let products = self.fetch_products().await?;
        Ok(products.into_iter().find(|p| p.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"[
        {"id": 1, "title": "Blue Shirt", "price": 10.0, "category": "men's clothing"},
        {"id": 2, "title": "Red Hat", "price": 20.0, "category": "accessories"}
    ]"#;

    #[tokio::test]
    async fn test_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, LISTING).unwrap();

        let source = FileProductSource::new(&path);
        assert_eq!(source.fetch_products().await.unwrap().len(), 2);
        assert_eq!(source.fetch_product(2).await.unwrap().map(|p| p.id), Some(2));
        assert!(source.fetch_product(3).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let source = FileProductSource::new("/definitely/not/here.json");
        let result = source.fetch_products().await;
        assert!(matches!(result, Err(SourceError::Transport(_))));
    }
}
