//! # Catalog Crate
//!
//! Product model and in-memory catalog for the storefront.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Product, Rating, Catalog, CategoryStats)
//! - **parser**: Decode and validate listing/detail JSON payloads
//! - **index**: Build the catalog indices and category statistics
//! - **error**: Error types for decoding and validation
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{parser, Catalog};
//!
//! let products = parser::parse_products(&body)?;
//! let catalog = Catalog::from_products(products);
//!
//! for stats in catalog.category_stats() {
//!     println!("{}: {} products", stats.category, stats.product_count);
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use types::{Catalog, CategoryStats, Product, ProductId, Rating};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_creation() {
        let catalog = Catalog::new();

        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
        assert!(catalog.categories().is_empty());
        assert!(catalog.category_stats().is_empty());
    }

    #[test]
    fn test_empty_queries() {
        let catalog = Catalog::new();

        assert!(catalog.get_product(999).is_none());
        assert_eq!(catalog.products_in_category("electronics").count(), 0);
        assert!(catalog.ids().is_empty());
    }

    #[test]
    fn test_stars() {
        let mut product = Product {
            id: 1,
            title: "Backpack".to_string(),
            price: 109.95,
            category: "men's clothing".to_string(),
            image: String::new(),
            description: String::new(),
            rating: Rating { score: 3.9, count: 120 },
        };
        assert_eq!(product.stars(), 4);

        product.rating.score = 2.4;
        assert_eq!(product.stars(), 2);
    }
}
