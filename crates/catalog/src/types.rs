//! Core domain types for the product catalog.
//!
//! Products are decoded straight from the source payload and never
//! mutated afterwards. The [`Catalog`] owns one full collection together
//! with the lookup indices built over it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// =============================================================================
// Type Aliases
// =============================================================================

/// Stable identifier assigned to a product by the source
pub type ProductId = u32;

// =============================================================================
// Product-related Types
// =============================================================================

/// A single product record as served by the product source.
///
/// Field names follow the source's JSON shape, so a record can be
/// deserialized without an intermediate wire type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Non-negative unit price
    pub price: f64,
    /// Free-form category label (the set of categories is open)
    pub category: String,
    /// URL of the product image, hosted by the source
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rating: Rating,
}

/// Aggregate customer rating for a product
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average score from 0.0 to 5.0
    #[serde(rename = "rate")]
    pub score: f32,
    /// Number of ratings behind the score
    pub count: u32,
}

impl Product {
    /// Whole stars to display for this product's score (0 to 5).
    pub fn stars(&self) -> u8 {
        self.rating.score.round().clamp(0.0, 5.0) as u8
    }
}

// =============================================================================
// Statistics Types
// =============================================================================

/// Precomputed statistics for one category
///
/// Computed once when the catalog is built, used for the category facet list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: String,
    pub product_count: usize,
    pub avg_price: f64,
    pub avg_rating: f32,
}

// =============================================================================
// Catalog - The In-Memory Product Collection
// =============================================================================

/// Full product collection plus the indices built over it.
///
/// `products` keeps the source order; every index stores positions into it
/// so that lookups never reorder the collection.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub(crate) products: Vec<Product>,

    /// Position of each product in `products`
    pub(crate) id_index: HashMap<ProductId, usize>,

    /// Product positions grouped by category, categories kept sorted
    pub(crate) category_index: BTreeMap<String, Vec<usize>>,

    // Precomputed statistics
    pub(crate) category_stats: Vec<CategoryStats>,
}

impl Catalog {
    /// Creates a new, empty Catalog
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
            id_index: HashMap::new(),
            category_index: BTreeMap::new(),
            category_stats: Vec::new(),
        }
    }

    /// All products, in source order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Get a product by ID
    pub fn get_product(&self, id: ProductId) -> Option<&Product> {
        self.id_index.get(&id).map(|&pos| &self.products[pos])
    }

    /// Product identifiers in source order
    pub fn ids(&self) -> Vec<ProductId> {
        self.products.iter().map(|p| p.id).collect()
    }

    /// All products in a category, in source order
    ///
    /// Returns an empty iterator for unknown categories.
    pub fn products_in_category<'a>(
        &'a self,
        category: &str,
    ) -> impl Iterator<Item = &'a Product> + 'a {
        self.category_index
            .get(category)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&pos| &self.products[pos])
    }

    /// Distinct categories, sorted alphabetically
    pub fn categories(&self) -> Vec<&str> {
        self.category_index.keys().map(String::as_str).collect()
    }

    /// Per-category statistics, sorted by category name
    pub fn category_stats(&self) -> &[CategoryStats] {
        &self.category_stats
    }

    /// Lowest and highest price in the catalog, `None` when empty
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        self.products.iter().map(|p| p.price).fold(None, |acc, price| match acc {
            None => Some((price, price)),
            Some((lo, hi)) => Some((lo.min(price), hi.max(price))),
        })
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
