//! Example: Fetch the live catalog
//!
//! Run with: cargo run --package sources --example fetch_catalog
//!
//! This example shows how to:
//! 1. Fetch the product listing from the public API
//! 2. Build a catalog from it
//! 3. Fetch one product detail

use catalog::Catalog;
use sources::{DEFAULT_BASE_URL, HttpProductSource, ProductSource};
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    println!("=== Storefront Catalog Fetch Example ===\n");

    let source = HttpProductSource::new(DEFAULT_BASE_URL, Duration::from_secs(10))?;

    let start = Instant::now();
    let products = source.fetch_products().await?;
    println!("Fetched {} products in {:?}", products.len(), start.elapsed());

    let catalog = Catalog::from_products(products);
    for stats in catalog.category_stats() {
        println!(
            "  {:<20} {:>3} products, avg ${:.2}, avg rating {:.1}",
            stats.category, stats.product_count, stats.avg_price, stats.avg_rating
        );
    }
    println!();

    match source.fetch_product(1).await? {
        Some(product) => println!("Product 1: {} (${:.2})", product.title, product.price),
        None => println!("Product 1 not found"),
    }

    Ok(())
}
