//! Core trait for product sources.
//!
//! A product source is an opaque collaborator that serves the full product
//! listing and single product details. The storefront never looks past
//! this trait, so the HTTP client, the offline file and the in-memory test
//! sources are interchangeable.

use crate::error::Result;
use catalog::{Product, ProductId};
use std::future::Future;
use std::sync::Arc;

/// Anything that can serve the product collection.
///
/// ## Design Note
/// - Futures are `Send` so sources can be driven from any tokio task
/// - A missing product is `Ok(None)`, not an error
pub trait ProductSource: Send + Sync {
    /// Returns the name of this source (for logging/debugging)
    fn name(&self) -> &str;

    /// Fetch the full product listing, in source order.
    fn fetch_products(&self) -> impl Future<Output = Result<Vec<Product>>> + Send;

    /// Fetch a single product.
    ///
    /// # Returns
    /// * `Ok(Some(product))` - the product exists
    /// * `Ok(None)` - the source does not know this id
    /// * `Err` - the source could not answer
    fn fetch_product(&self, id: ProductId) -> impl Future<Output = Result<Option<Product>>> + Send;
}

impl<S: ProductSource> ProductSource for Arc<S> {
    fn name(&self) -> &str {
        self.as_ref().name()
    }

    fn fetch_products(&self) -> impl Future<Output = Result<Vec<Product>>> + Send {
        self.as_ref().fetch_products()
    }

    fn fetch_product(&self, id: ProductId) -> impl Future<Output = Result<Option<Product>>> + Send {
        self.as_ref().fetch_product(id)
    }
}
