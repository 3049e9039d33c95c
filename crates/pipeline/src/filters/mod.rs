//! Filter implementations for the query pipeline.
//!
//! Listed cheapest-first, which is the order the standard pipeline runs
//! them in.

pub mod category;
pub mod price_range;
pub mod text_search;

// Re-export for convenience
pub use category::CategoryFilter;
pub use price_range::PriceRangeFilter;
pub use text_search::TextSearchFilter;
