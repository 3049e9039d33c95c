//! # Sources Crate
//!
//! Product sources for the storefront.
//!
//! ## Components
//!
//! ### HttpProductSource
//! Reads a fake-store style REST API (`GET /products`, `GET /products/{id}`).
//! This is the source the storefront uses by default.
//!
//! ### FileProductSource
//! Replays a saved listing from a JSON file, for offline use.
//!
//! ### StaticProductSource
//! Serves a fixed in-memory list, or fails every request.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{HttpProductSource, ProductSource, DEFAULT_BASE_URL};
//! use std::time::Duration;
//!
//! let source = HttpProductSource::new(DEFAULT_BASE_URL, Duration::from_secs(10))?;
//! let products = source.fetch_products().await?;
//! let detail = source.fetch_product(1).await?;
//! ```

// Public modules
pub mod error;
pub mod traits;
pub mod http;
pub mod file;
pub mod memory;

// Re-export commonly used types
pub use error::{Result, SourceError};
pub use traits::ProductSource;
pub use http::{DEFAULT_BASE_URL, HttpProductSource};
pub use file::FileProductSource;
pub use memory::StaticProductSource;

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Product, Rating};
    use std::sync::Arc;

    fn create_test_products() -> Vec<Product> {
        vec![
            Product {
                id: 1,
                title: "Blue Shirt".to_string(),
                price: 10.0,
                category: "men's clothing".to_string(),
                image: String::new(),
                description: String::new(),
                rating: Rating { score: 4.0, count: 10 },
            },
            Product {
                id: 2,
                title: "Red Hat".to_string(),
                price: 20.0,
                category: "accessories".to_string(),
                image: String::new(),
                description: String::new(),
                rating: Rating { score: 3.0, count: 5 },
            },
        ]
    }

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticProductSource::new(create_test_products());

        let products = source.fetch_products().await.unwrap();
        assert_eq!(products.len(), 2);

        let product = source.fetch_product(2).await.unwrap();
        assert_eq!(product.map(|p| p.title), Some("Red Hat".to_string()));
        assert!(source.fetch_product(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unavailable_source() {
        let source = StaticProductSource::unavailable("offline");

        assert!(matches!(
            source.fetch_products().await,
            Err(SourceError::Transport(_))
        ));
        assert!(source.fetch_product(1).await.is_err());
    }

    #[tokio::test]
    async fn test_arc_source_delegates() {
        let source = Arc::new(StaticProductSource::new(create_test_products()));

        assert_eq!(source.name(), "static");
        assert_eq!(source.fetch_products().await.unwrap().len(), 2);
    }
}
