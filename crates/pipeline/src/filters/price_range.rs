//! Filter to keep products inside the selected price range.

use crate::query::QuerySpec;
use crate::traits::Filter;
use catalog::Product;

/// Keeps products with `min <= price <= max` (both bounds inclusive).
pub struct PriceRangeFilter;

impl Filter for PriceRangeFilter {
    fn name(&self) -> &str {
        "PriceRangeFilter"
    }

    fn is_active(&self, query: &QuerySpec) -> bool {
        !query.price.is_unbounded()
    }

    fn matches(&self, product: &Product, query: &QuerySpec) -> bool {
        query.price.contains(product.price)
    }
}
