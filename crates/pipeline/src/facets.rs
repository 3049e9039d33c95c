//! Facet counts over a filtered result.
//!
//! Facets drive the filter sidebar: how many of the current results fall
//! into each category and what price span they cover.

use catalog::Product;
use rayon::prelude::*;
use std::collections::HashMap;

/// Number of results carrying one facet value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetCount {
    pub value: String,
    pub count: usize,
}

/// Facets computed for one result set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Facets {
    /// Categories by descending count, ties by name
    pub categories: Vec<FacetCount>,
    /// Lowest and highest price, `None` for an empty result
    pub price_bounds: Option<(f64, f64)>,
    pub total: usize,
}

impl Facets {
    /// Compute facets for a result set.
    ///
    /// Category counting is done in parallel with Rayon's fold/reduce.
    pub fn compute(results: &[Product]) -> Self {
        let counts: HashMap<&str, usize> = results
            .par_iter()
            .fold(HashMap::new, |mut acc, product| {
                *acc.entry(product.category.as_str()).or_insert(0) += 1;
                acc
            })
            .reduce(HashMap::new, |mut left, right| {
                for (category, count) in right {
                    *left.entry(category).or_insert(0) += count;
                }
                left
            });

        let mut categories: Vec<FacetCount> = counts
            .into_iter()
            .map(|(value, count)| FacetCount {
                value: value.to_string(),
                count,
            })
            .collect();
        categories.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));

        let price_bounds = results.iter().map(|p| p.price).fold(None, |acc, price| match acc {
            None => Some((price, price)),
            Some((lo, hi)) => Some((f64::min(lo, price), f64::max(hi, price))),
        });

        Self {
            categories,
            price_bounds,
            total: results.len(),
        }
    }
}
