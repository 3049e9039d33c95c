//! Query pipeline for the storefront listing.
//!
//! This crate provides:
//! - QuerySpec, the normalized user query (search, category, price, sort)
//! - Filter trait and implementations for narrowing a snapshot
//! - QueryPipeline for composing filters and the final sort
//! - Pagination and page navigation markers
//! - BrowseSession for per-user query and page state
//! - Facet counts for the filter sidebar
//!
//! ## Architecture
//! A listing render processes the current snapshot in stages:
//! 1. Filters remove products that violate the query (category, price, text)
//! 2. The survivors are sorted by the query's key, stably
//! 3. The paginator slices out the requested page
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{filter, paginate, QuerySpec, SortKey};
//!
//! let query = QuerySpec::new()
//!     .with_search("shirt")
//!     .with_sort(SortKey::PriceAsc);
//!
//! let results = filter(catalog.products(), &query);
//! let page = paginate(&results, 1, pipeline::DEFAULT_PAGE_SIZE);
//! ```

pub mod query;
pub mod traits;
pub mod filters;
pub mod sorting;
pub mod filter_pipeline;
pub mod paginator;
pub mod session;
pub mod facets;

// Re-export main types
pub use facets::{FacetCount, Facets};
pub use filter_pipeline::{QueryPipeline, filter};
pub use paginator::{DEFAULT_PAGE_SIZE, Page, PageMarker, clamp_page, page_numbers, paginate, total_pages};
pub use query::{CategorySelection, PriceRange, QuerySpec, SortKey};
pub use session::{BrowseSession, PageWindow};
pub use sorting::sort_products;
pub use traits::Filter;
