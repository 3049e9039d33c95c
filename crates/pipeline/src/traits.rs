//! Core traits for the query pipeline.
//!
//! This module defines the Filter trait that lets the pipeline compose
//! independent product predicates.

use crate::query::QuerySpec;
use catalog::Product;

/// Core trait for product predicates.
///
/// All filters must implement this trait to be used in the QueryPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows one pipeline to be shared between tasks
/// - Filters work on borrowed products; only the survivors are cloned,
///   once, at the end of the pipeline
/// - Filters never fail: a predicate that cannot be evaluated matches
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether this filter restricts anything for the given query.
    ///
    /// Inactive filters are skipped by the pipeline.
    fn is_active(&self, _query: &QuerySpec) -> bool {
        true
    }

    /// Whether a single product satisfies this filter.
    fn matches(&self, product: &Product, query: &QuerySpec) -> bool;

    /// Apply this filter to a set of products, keeping their order.
    fn apply<'a>(&self, products: Vec<&'a Product>, query: &QuerySpec) -> Vec<&'a Product> {
        products
            .into_iter()
            .filter(|product| self.matches(product, query))
            .collect()
    }
}
