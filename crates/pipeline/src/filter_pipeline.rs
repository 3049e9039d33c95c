//! The QueryPipeline orchestrates filters and the final sort.
//!
//! This module provides the main QueryPipeline struct that chains
//! filters together using the builder pattern, and the [`filter`]
//! entry point used by the storefront.

use crate::filters::{CategoryFilter, PriceRangeFilter, TextSearchFilter};
use crate::query::QuerySpec;
use crate::sorting::sort_products;
use crate::traits::Filter;
use catalog::Product;
use tracing::debug;

/// Chains product filters into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = QueryPipeline::new()
///     .add_filter(CategoryFilter)
///     .add_filter(PriceRangeFilter)
///     .add_filter(TextSearchFilter);
///
/// let results = pipeline.run(snapshot.products(), &query);
/// ```
pub struct QueryPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl QueryPipeline {
    /// Create a new empty QueryPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// The storefront pipeline: category, price, then text search.
    ///
    /// Equality and range checks run before the substring scan so the
    /// scan sees as few products as possible.
    pub fn standard() -> Self {
        Self::new()
            .add_filter(CategoryFilter)
            .add_filter(PriceRangeFilter)
            .add_filter(TextSearchFilter)
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the filters, in application order.
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Whether a product passes every filter of this pipeline.
    pub fn matches(&self, product: &Product, query: &QuerySpec) -> bool {
        self.filters.iter().all(|f| f.matches(product, query))
    }

    /// Run the query against a snapshot.
    ///
    /// ## Algorithm
    /// 1. Borrow every product of the snapshot
    /// 2. For each active filter, in order, narrow the set
    /// 3. Clone the survivors and sort them by the query's key (stable)
    ///
    /// The result is always a subset of `snapshot`; an empty snapshot
    /// gives an empty result.
    pub fn run(&self, snapshot: &[Product], query: &QuerySpec) -> Vec<Product> {
        let mut current: Vec<&Product> = snapshot.iter().collect();

        for filter in &self.filters {
            if !filter.is_active(query) {
                continue;
            }
            debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, query);
            debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }

        let mut results: Vec<Product> = current.into_iter().cloned().collect();
        sort_products(&mut results, query.sort);
        results
    }
}

impl Default for QueryPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Filter and sort a snapshot with the standard pipeline.
pub fn filter(snapshot: &[Product], query: &QuerySpec) -> Vec<Product> {
    QueryPipeline::standard().run(snapshot, query)
}
