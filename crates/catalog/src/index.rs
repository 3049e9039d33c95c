//! Catalog building and indexing logic.
//!
//! Builds a [`Catalog`] from decoded products:
//! - primary index (id -> position)
//! - secondary index (category -> positions)
//! - aggregate statistics per category

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::*;
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, warn};

impl Catalog {
    /// Build a catalog from a product collection.
    ///
    /// Steps:
    /// 1. Validate and insert every product; invalid records and repeated
    ///    ids are skipped with a warning (the first record of an id wins)
    /// 2. Build the category index
    /// 3. Compute category statistics
    pub fn from_products(products: Vec<Product>) -> Self {
        let mut catalog = Catalog::new();

        for product in products {
            let inserted = parser::validate_product(&product)
                .and_then(|()| catalog.insert_product(product));
            if let Err(e) = inserted {
                warn!("Skipping product record: {}", e);
            }
        }

        catalog.build_secondary_indices();
        catalog.compute_category_stats();

        debug!(
            "Built catalog with {} products in {} categories",
            catalog.len(),
            catalog.category_index.len()
        );
        catalog
    }

    /// Load a catalog from a JSON listing file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let products = parser::parse_products_file(path)?;
        Ok(Self::from_products(products))
    }

    /// Append a product, keeping source order.
    ///
    /// Secondary indices are not touched; call
    /// [`build_secondary_indices`](Self::build_secondary_indices) and
    /// [`compute_category_stats`](Self::compute_category_stats) afterwards.
    pub fn insert_product(&mut self, product: Product) -> Result<()> {
        if self.id_index.contains_key(&product.id) {
            return Err(CatalogError::DuplicateId(product.id));
        }
        self.id_index.insert(product.id, self.products.len());
        self.products.push(product);
        Ok(())
    }

    /// Rebuild the category index from the primary data
    pub fn build_secondary_indices(&mut self) {
        self.category_index.clear();
        for (pos, product) in self.products.iter().enumerate() {
            self.category_index
                .entry(product.category.clone())
                .or_default()
                .push(pos);
        }
    }

    /// Compute aggregate statistics for every category in parallel
    pub fn compute_category_stats(&mut self) {
        let products = &self.products;
        let mut stats: Vec<CategoryStats> = self
            .category_index
            .par_iter()
            .map(|(category, positions)| {
                let product_count = positions.len();
                let (price_total, rating_total) = positions
                    .iter()
                    .map(|&pos| &products[pos])
                    .fold((0.0f64, 0.0f32), |(price, rating), p| {
                        (price + p.price, rating + p.rating.score)
                    });

                let (avg_price, avg_rating) = if product_count > 0 {
                    (
                        price_total / product_count as f64,
                        rating_total / product_count as f32,
                    )
                } else {
                    (0.0, 0.0)
                };

                CategoryStats {
                    category: category.clone(),
                    product_count,
                    avg_price,
                    avg_rating,
                }
            })
            .collect();

        // par_iter over a BTreeMap does not promise order
        stats.sort_by(|a, b| a.category.cmp(&b.category));
        self.category_stats = stats;
    }
}
