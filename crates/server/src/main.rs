//! Simple test harness for the storefront.
//!
//! This binary exercises the end-to-end flow against the configured
//! product source: load the listing, render the first page, fetch one
//! product detail.

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pipeline::QuerySpec;
use server::{Config, DetailOutcome, ListingView, Storefront};
use sources::HttpProductSource;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,server=debug,sources=debug,pipeline=debug")),
        )
        .init();

    info!("Starting storefront test harness");

    let config = Config::from_env().context("Invalid storefront configuration")?;
    let source = HttpProductSource::new(&config.source_url, config.timeout)
        .context("Failed to build HTTP client")?;
    let mut store = Storefront::from_config(source, &config);

    info!("Loading listing from {}", config.source_url);
    match store.listing(&QuerySpec::new(), 1).await {
        ListingView::Ready(listing) => {
            info!(
                "Page {}/{} of {} products (snapshot v{})",
                listing.page.page, listing.page.total_pages, listing.page.total_items, listing.snapshot_version
            );
            for product in &listing.page.items {
                info!("  #{} {} - ${:.2} [{}]", product.id, product.title, product.price, product.category);
            }
        }
        ListingView::Empty => info!("The catalog is empty"),
        ListingView::Error { reason } => warn!("Listing unavailable: {}", reason),
        ListingView::Loading => {}
    }

    let paths = store.product_paths().await;
    if let Some(&id) = paths.first() {
        match store.product(id).await {
            DetailOutcome::Found(product) => info!("Detail #{}: {}", id, product.title),
            DetailOutcome::NotFound => warn!("Product {} not found", id),
        }
    }

    Ok(())
}
