//! # Storefront
//!
//! Coordinates the product source, the snapshot cache and the query
//! pipeline into the views the catalog renders:
//! 1. Read the snapshot (refreshing it when stale)
//! 2. Run the query pipeline over it
//! 3. Paginate and compute facets
//! 4. Wrap the outcome in a [`ListingView`]
//!
//! Nothing here returns an error. Source failures become the `Error` view
//! (no data at all), a stale-but-served `Ready` view, or
//! [`DetailOutcome::NotFound`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use catalog::{CategoryStats, Product, ProductId};
use pipeline::{BrowseSession, Facets, Page, QuerySpec, filter, paginate};
use sources::ProductSource;

use crate::config::Config;
use crate::snapshot::{CacheState, RefreshOutcome, Snapshot, SnapshotCache};

/// A rendered page of the listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPage {
    pub page: Page,
    /// Facets over the whole filtered result, not just this page
    pub facets: Facets,
    /// Every category of the snapshot, for the category picker
    pub categories: Vec<String>,
    pub snapshot_version: u64,
    /// The data is past its revalidation window and the last refresh failed
    pub stale: bool,
}

/// What the listing shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ListingView {
    /// Nothing requested yet
    #[default]
    Loading,
    /// Loaded, but no product matches the query
    Empty,
    /// No data could be loaded
    Error { reason: String },
    Ready(ListingPage),
}

impl ListingView {
    /// Whether the view should offer a retry action.
    pub fn can_retry(&self) -> bool {
        matches!(self, ListingView::Error { .. })
    }

    /// Products to render; empty for every state but `Ready`.
    pub fn products(&self) -> &[Product] {
        match self {
            ListingView::Ready(listing) => &listing.page.items,
            _ => &[],
        }
    }
}

/// Outcome of a product detail request.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailOutcome {
    Found(Product),
    NotFound,
}

impl DetailOutcome {
    pub fn product(&self) -> Option<&Product> {
        match self {
            DetailOutcome::Found(product) => Some(product),
            DetailOutcome::NotFound => None,
        }
    }
}

struct CachedDetail {
    product: Product,
    fetched_at: Instant,
}

/// Listing and detail operations over one product source.
pub struct Storefront<S> {
    cache: SnapshotCache<S>,
    details: HashMap<ProductId, CachedDetail>,
    page_size: usize,
}

impl<S: ProductSource> Storefront<S> {
    /// Create a storefront.
    ///
    /// # Arguments
    /// * `source` - Product source for listing and detail fetches
    /// * `revalidate` - Revalidation window for the snapshot and details
    /// * `page_size` - Products per listing page (0 is treated as 1)
    pub fn new(source: S, revalidate: Duration, page_size: usize) -> Self {
        Self {
            cache: SnapshotCache::new(source, revalidate),
            details: HashMap::new(),
            page_size: page_size.max(1),
        }
    }

    pub fn from_config(source: S, config: &Config) -> Self {
        Self::new(source, config.revalidate, config.page_size)
    }

    pub fn cache(&self) -> &SnapshotCache<S> {
        &self.cache
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The current snapshot, refreshed if stale.
    pub async fn snapshot(&mut self) -> Arc<Snapshot> {
        self.cache.snapshot().await
    }

    /// Force a refresh of the snapshot, regardless of its age.
    pub async fn refresh(&mut self) -> bool {
        let outcome = self.cache.refresh().await;
        debug!("Manual refresh: {:?}", outcome);
        matches!(outcome, RefreshOutcome::Applied { .. })
    }

    /// Render one page of the listing.
    ///
    /// # Arguments
    /// * `query` - The user's query
    /// * `page` - Requested 1-based page; clamped into range
    pub async fn listing(&mut self, query: &QuerySpec, page: i64) -> ListingView {
        let snapshot = match self.load().await {
            Ok(snapshot) => snapshot,
            Err(reason) => return ListingView::Error { reason },
        };

        let results = filter(snapshot.products(), query);
        let page = paginate(&results, page, self.page_size);
        self.render(&snapshot, &results, page)
    }

    /// Render the listing for a browse session, clamping its page window.
    pub async fn browse(&mut self, session: &mut BrowseSession) -> ListingView {
        let snapshot = match self.load().await {
            Ok(snapshot) => snapshot,
            Err(reason) => return ListingView::Error { reason },
        };

        let results = filter(snapshot.products(), session.query());
        let page = session.page_of(&results);
        self.render(&snapshot, &results, page)
    }

    /// Fetch one product, revalidating per id.
    ///
    /// A fresh cached detail is served without a fetch. A source failure
    /// or an unknown id is [`DetailOutcome::NotFound`].
    pub async fn product(&mut self, id: ProductId) -> DetailOutcome {
        let ttl = self.cache.ttl();
        if let Some(cached) = self.details.get(&id) {
            if cached.fetched_at.elapsed() < ttl {
                debug!("Serving cached detail for product {}", id);
                return DetailOutcome::Found(cached.product.clone());
            }
        }

        match self.cache.source().fetch_product(id).await {
            Ok(Some(product)) => {
                self.details.insert(
                    id,
                    CachedDetail {
                        product: product.clone(),
                        fetched_at: Instant::now(),
                    },
                );
                DetailOutcome::Found(product)
            }
            Ok(None) => {
                info!("Product {} not found", id);
                self.details.remove(&id);
                DetailOutcome::NotFound
            }
            Err(e) => {
                warn!("Detail fetch for product {} failed: {}", id, e);
                self.details.remove(&id);
                DetailOutcome::NotFound
            }
        }
    }

    /// Distinct categories of the current snapshot, sorted.
    pub async fn categories(&mut self) -> Vec<String> {
        let snapshot = self.cache.snapshot().await;
        snapshot
            .catalog()
            .categories()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Per-category statistics of the current snapshot.
    pub async fn category_stats(&mut self) -> Vec<CategoryStats> {
        let snapshot = self.cache.snapshot().await;
        snapshot.catalog().category_stats().to_vec()
    }

    /// Ids of every product with a detail page, in listing order.
    ///
    /// Empty when the listing cannot be loaded.
    pub async fn product_paths(&mut self) -> Vec<ProductId> {
        self.cache.snapshot().await.catalog().ids()
    }

    /// Pre-fetch the detail of every listed product.
    ///
    /// Returns how many details were found.
    pub async fn warm(&mut self) -> usize {
        let ids = self.product_paths().await;
        let mut found = 0;
        for id in &ids {
            if let DetailOutcome::Found(_) = self.product(*id).await {
                found += 1;
            }
        }
        info!("Warmed {}/{} product details", found, ids.len());
        found
    }

    /// Snapshot to render from, or the reason there is none.
    async fn load(&mut self) -> Result<Arc<Snapshot>, String> {
        let snapshot = self.cache.snapshot().await;
        if self.cache.state() == CacheState::Empty {
            let reason = self
                .cache
                .last_error()
                .unwrap_or("product source unavailable")
                .to_string();
            warn!("Listing has no data to fall back to: {}", reason);
            return Err(reason);
        }
        Ok(snapshot)
    }

    fn render(&self, snapshot: &Snapshot, results: &[Product], page: Page) -> ListingView {
        if results.is_empty() {
            return ListingView::Empty;
        }

        ListingView::Ready(ListingPage {
            page,
            facets: Facets::compute(results),
            categories: snapshot
                .catalog()
                .categories()
                .into_iter()
                .map(str::to_string)
                .collect(),
            snapshot_version: snapshot.version(),
            stale: self.cache.state() == CacheState::Stale && self.cache.last_error().is_some(),
        })
    }
}
