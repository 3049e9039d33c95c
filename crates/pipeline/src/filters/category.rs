//! Filter to keep only products in the selected category.

use crate::query::{CategorySelection, QuerySpec};
use crate::traits::Filter;
use catalog::Product;

/// Keeps products whose category equals the selected one exactly.
///
/// `CategorySelection::Any` keeps everything, so the filter is inactive.
pub struct CategoryFilter;

impl Filter for CategoryFilter {
    fn name(&self) -> &str {
        "CategoryFilter"
    }

    fn is_active(&self, query: &QuerySpec) -> bool {
        !query.category.is_any()
    }

    fn matches(&self, product: &Product, query: &QuerySpec) -> bool {
        match &query.category {
            CategorySelection::Any => true,
            CategorySelection::Exactly(category) => product.category == *category,
        }
    }
}
