//! Filter for free-text search.
//!
//! Case-insensitive substring match against the product title or its
//! category label.

use crate::query::QuerySpec;
use crate::traits::Filter;
use catalog::Product;

/// Keeps products whose title or category contains the search text.
///
/// ## Algorithm
/// 1. Lowercase the (trimmed) search text once per pass
/// 2. Keep products where the lowercased title or category contains it
///
/// Empty search text keeps everything.
pub struct TextSearchFilter;

impl TextSearchFilter {
    fn needle(query: &QuerySpec) -> String {
        query.search.trim().to_lowercase()
    }

    fn contains(product: &Product, needle: &str) -> bool {
        needle.is_empty()
            || product.title.to_lowercase().contains(needle)
            || product.category.to_lowercase().contains(needle)
    }
}

impl Filter for TextSearchFilter {
    fn name(&self) -> &str {
        "TextSearchFilter"
    }

    fn is_active(&self, query: &QuerySpec) -> bool {
        !query.search.trim().is_empty()
    }

    fn matches(&self, product: &Product, query: &QuerySpec) -> bool {
        Self::contains(product, &Self::needle(query))
    }

    fn apply<'a>(&self, products: Vec<&'a Product>, query: &QuerySpec) -> Vec<&'a Product> {
        let needle = Self::needle(query);
        products
            .into_iter()
            .filter(|product| Self::contains(product, &needle))
            .collect()
    }
}
