mod source;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use pipeline::{CategorySelection, PageMarker, PriceRange, QuerySpec, SortKey};
use rand::seq::IndexedRandom;
use rand::Rng;
use server::{Config, DetailOutcome, ListingView, Profile, Storefront};
use sources::{FileProductSource, HttpProductSource};
use source::CatalogSource;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Storefront - Product Catalog Browser
#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Browse, filter and sort a product catalog", long_about = None)]
struct Cli {
    /// Root of the product REST API (overrides STOREFRONT_SOURCE_URL)
    #[arg(long, global = true)]
    source_url: Option<String>,

    /// Read products from a saved JSON listing instead of the API
    #[arg(long, global = true, value_name = "FILE")]
    offline: Option<PathBuf>,

    /// Revalidation window in seconds (overrides STOREFRONT_REVALIDATE_SECS)
    #[arg(long, global = true)]
    revalidate_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products matching a query
    List {
        /// Text to find in titles and categories (case-insensitive)
        #[arg(long, default_value = "")]
        search: String,

        /// Exact category, or "any"
        #[arg(long, default_value = "any")]
        category: CategorySelection,

        #[arg(long)]
        min_price: Option<f64>,

        #[arg(long)]
        max_price: Option<f64>,

        /// none, price-asc, price-desc, rating-desc or popularity-desc
        #[arg(long, default_value = "none")]
        sort: SortKey,

        /// Page to show; out-of-range pages are clamped
        #[arg(long, default_value = "1", allow_negative_numbers = true)]
        page: i64,

        /// Products per page (overrides STOREFRONT_PAGE_SIZE)
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Show one product
    Show {
        #[arg(long)]
        id: u32,
    },

    /// List categories with product counts and averages
    Categories,

    /// List the detail page path of every product
    Paths {
        /// Also pre-fetch every product detail
        #[arg(long)]
        warm: bool,
    },

    /// Show the landing page card
    About {
        /// JSON profile file; a placeholder card is shown without one
        #[arg(long, value_name = "FILE")]
        profile: Option<PathBuf>,
    },

    /// Re-render the first listing page on an interval
    Watch {
        #[arg(long, default_value = "5")]
        interval_secs: u64,

        /// Stop after this many renders
        #[arg(long)]
        rounds: Option<usize>,
    },

    /// Run random queries against the snapshot and report latencies
    Benchmark {
        /// Number of queries to run
        #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
        iterations: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("Invalid storefront configuration")?;
    if let Some(url) = &cli.source_url {
        config.source_url = url.clone();
    }
    if let Some(secs) = cli.revalidate_secs {
        config.revalidate = Duration::from_secs(secs);
    }
    if let Commands::List {
        page_size: Some(size),
        ..
    } = &cli.command
    {
        config.page_size = (*size).max(1);
    }

    let source = match &cli.offline {
        Some(path) => CatalogSource::File(FileProductSource::new(path)),
        None => CatalogSource::Http(
            HttpProductSource::new(&config.source_url, config.timeout)
                .context("Failed to build HTTP client")?,
        ),
    };
    let mut store = Storefront::from_config(source, &config);

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::List {
            search,
            category,
            min_price,
            max_price,
            sort,
            page,
            ..
        } => {
            let query = QuerySpec::new()
                .with_search(search)
                .with_category(category)
                .with_price_range(PriceRange::new(min_price, max_price))
                .with_sort(sort);
            handle_list(&mut store, &query, page).await
        }
        Commands::Show { id } => handle_show(&mut store, id).await,
        Commands::Categories => handle_categories(&mut store).await,
        Commands::Paths { warm } => handle_paths(&mut store, warm).await,
        Commands::About { profile } => handle_about(profile),
        Commands::Watch {
            interval_secs,
            rounds,
        } => handle_watch(&mut store, interval_secs, rounds).await,
        Commands::Benchmark { iterations } => handle_benchmark(&mut store, iterations as usize).await,
    }
}

/// Handle the 'list' command
async fn handle_list(store: &mut Storefront<CatalogSource>, query: &QuerySpec, page: i64) -> Result<()> {
    let view = store.listing(query, page).await;
    print_listing(&view, query);
    Ok(())
}

/// Handle the 'show' command
async fn handle_show(store: &mut Storefront<CatalogSource>, id: u32) -> Result<()> {
    let product = match store.product(id).await {
        DetailOutcome::Found(product) => product,
        DetailOutcome::NotFound => return Err(anyhow!("Product {} not found", id)),
    };

    println!("{}", product.title.bold().blue());
    println!("{}Price: ${:.2}", "• ".green(), product.price);
    println!("{}Category: {}", "• ".green(), product.category);
    println!(
        "{}Rating: {} {:.1} ({} reviews)",
        "• ".green(),
        stars(product.stars()),
        product.rating.score,
        product.rating.count
    );
    if !product.image.is_empty() {
        println!("{}Image: {}", "• ".green(), product.image);
    }
    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }
    Ok(())
}

/// Handle the 'categories' command
async fn handle_categories(store: &mut Storefront<CatalogSource>) -> Result<()> {
    let stats = store.category_stats().await;
    if stats.is_empty() {
        println!("{}", "No categories available.".yellow());
        return Ok(());
    }

    println!("{}", "Categories:".bold().blue());
    for stat in stats {
        println!(
            "  {:<24} {:>3} products, avg ${:.2}, avg rating {:.1}",
            stat.category, stat.product_count, stat.avg_price, stat.avg_rating
        );
    }
    Ok(())
}

/// Handle the 'paths' command
async fn handle_paths(store: &mut Storefront<CatalogSource>, warm: bool) -> Result<()> {
    let paths = store.product_paths().await;
    for id in &paths {
        println!("/products/{}", id);
    }

    if warm {
        let found = store.warm().await;
        println!("{} Warmed {}/{} product details", "✓".green(), found, paths.len());
    }
    Ok(())
}

/// Handle the 'about' command
fn handle_about(profile: Option<PathBuf>) -> Result<()> {
    let profile = match profile {
        Some(path) => Profile::load(&path)?,
        None => Profile::placeholder(),
    };

    println!("{}", format!("[{}]", profile.initials()).bold().purple());
    println!("{}", profile.name.bold().purple());
    println!("{}", profile.headline.purple());
    if !profile.about.is_empty() {
        println!();
        println!("{}", profile.about);
    }
    println!();
    if let Some(email) = &profile.email {
        println!("{}{}", "✉ ".purple(), email);
    }
    for link in &profile.links {
        println!("{}{}: {}", "→ ".purple(), link.label, link.url);
    }
    println!();
    println!("Browse the catalog: {}", "storefront list".bold());
    Ok(())
}

/// Handle the 'watch' command
async fn handle_watch(
    store: &mut Storefront<CatalogSource>,
    interval_secs: u64,
    rounds: Option<usize>,
) -> Result<()> {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
    let query = QuerySpec::new();
    let mut rendered = 0;

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => break,
        }

        let view = store.listing(&query, 1).await;
        let state = format!("{:?}", store.cache().state());
        let version = store.cache().current().map_or(0, |s| s.version());
        info!("Render {}: cache {}, snapshot v{}", rendered + 1, state, version);
        if let Some(reason) = store.cache().last_error() {
            warn!("Last refresh failed: {}", reason);
        }
        println!(
            "{} cache {} (revalidate every {:?})",
            format!("[render {}]", rendered + 1).dimmed(),
            state,
            store.cache().ttl()
        );
        print_listing(&view, &query);

        rendered += 1;
        if rounds.is_some_and(|limit| rendered >= limit) {
            break;
        }
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(store: &mut Storefront<CatalogSource>, iterations: usize) -> Result<()> {
    let snapshot = store.snapshot().await;
    if snapshot.products().is_empty() {
        bail!(
            "No products to benchmark against: {}",
            store.cache().last_error().unwrap_or("empty catalog")
        );
    }

    let categories: Vec<String> = snapshot
        .catalog()
        .categories()
        .into_iter()
        .map(str::to_string)
        .collect();
    let words: Vec<String> = snapshot
        .products()
        .iter()
        .filter_map(|p| p.title.split_whitespace().next())
        .map(str::to_lowercase)
        .collect();
    let (low, high) = snapshot.catalog().price_bounds().unwrap_or((0.0, 0.0));
    let page_size = store.page_size();
    info!(
        "Benchmarking {} queries against snapshot v{} ({} products)",
        iterations,
        snapshot.version(),
        snapshot.products().len()
    );

    // Generate the queries up front so only the pipeline is timed
    let mut rng = rand::rng();
    let queries: Vec<QuerySpec> = (0..iterations)
        .map(|_| random_query(&mut rng, &categories, &words, (low, high)))
        .collect();

    // Use spawn_blocking so queries run on the blocking pool in parallel
    let start = Instant::now();
    let mut handles = Vec::with_capacity(iterations);
    for query in queries {
        let snapshot = Arc::clone(&snapshot);
        handles.push(tokio::task::spawn_blocking(move || {
            let started = Instant::now();
            let results = pipeline::filter(snapshot.products(), &query);
            let page = pipeline::paginate(&results, 1, page_size);
            (started.elapsed(), page.total_items)
        }));
    }

    let mut timings = Vec::with_capacity(iterations);
    let mut matched = 0;
    for handle in handles {
        let (elapsed, total_items) = handle.await.context("Benchmark task panicked")?;
        timings.push(elapsed);
        matched += total_items;
    }
    let wall_time = start.elapsed();
    info!("Benchmark finished in {:?}", wall_time);

    timings.sort();
    let total: Duration = timings.iter().sum();
    let avg_latency = total / timings.len() as u32;

    println!("{}", "Benchmark results:".bold().blue());
    println!("Snapshot: {} products", snapshot.products().len());
    println!("Queries: {}", iterations);
    println!("Average matches per query: {:.1}", matched as f64 / iterations as f64);
    println!("Wall time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(&timings, 0.50));
    println!("P95 latency: {:?}", percentile(&timings, 0.95));
    println!("P99 latency: {:?}", percentile(&timings, 0.99));
    println!(
        "Throughput: {:.2} queries/second",
        iterations as f64 / wall_time.as_secs_f64()
    );

    Ok(())
}

fn random_query(
    rng: &mut impl Rng,
    categories: &[String],
    words: &[String],
    (low, high): (f64, f64),
) -> QuerySpec {
    let mut query = QuerySpec::new();

    if rng.random_bool(0.5) {
        if let Some(word) = words.choose(rng) {
            query = query.with_search(word.clone());
        }
    }
    if rng.random_bool(0.3) {
        if let Some(category) = categories.choose(rng) {
            query = query.with_category(CategorySelection::Exactly(category.clone()));
        }
    }
    if rng.random_bool(0.3) && high > low {
        let a = rng.random_range(low..=high);
        let b = rng.random_range(low..=high);
        query = query.with_price_range(PriceRange::new(Some(a), Some(b)));
    }
    if let Some(sort) = SortKey::ALL.choose(rng) {
        query = query.with_sort(*sort);
    }
    query
}

fn percentile(sorted: &[Duration], p: f64) -> Duration {
    let idx = ((sorted.len() as f64 * p) as usize).min(sorted.len().saturating_sub(1));
    sorted.get(idx).copied().unwrap_or_default()
}

fn stars(count: u8) -> String {
    let count = count.min(5) as usize;
    format!("{}{}", "★".repeat(count), "☆".repeat(5 - count))
        .yellow()
        .to_string()
}

/// Helper function to format and print a listing view
fn print_listing(view: &ListingView, query: &QuerySpec) {
    match view {
        ListingView::Loading => println!("{}", "Loading products...".dimmed()),
        ListingView::Empty => {
            println!("{}", "No products match your filters.".yellow());
            if query != &QuerySpec::new() {
                println!("Try clearing the search, category or price range.");
            }
        }
        ListingView::Error { reason } => {
            println!("{} {}", "Could not load products:".red().bold(), reason);
            println!("Retry with: {}", "storefront list".bold());
        }
        ListingView::Ready(listing) => {
            let page = &listing.page;
            if listing.stale {
                println!(
                    "{}",
                    "Showing saved products; the catalog could not be refreshed.".yellow()
                );
            }

            let (first, last) = page.item_range().unwrap_or((0, 0));
            println!(
                "{}",
                format!(
                    "Products {}-{} of {} (sorted by {})",
                    first,
                    last,
                    page.total_items,
                    query.sort.label()
                )
                .bold()
                .blue()
            );
            for product in &page.items {
                println!(
                    "{:>4}. {} {} {} {}",
                    product.id.to_string().green(),
                    product.title,
                    format!("${:.2}", product.price).bold(),
                    stars(product.stars()),
                    format!("({}) [{}]", product.rating.count, product.category).dimmed()
                );
            }

            let markers: Vec<String> = page
                .page_numbers()
                .into_iter()
                .map(|marker| match marker {
                    PageMarker::Page(n) if n == page.page => format!("[{}]", n).bold().to_string(),
                    PageMarker::Page(n) => n.to_string(),
                    PageMarker::Ellipsis => "…".to_string(),
                })
                .collect();
            println!("Pages: {}", markers.join(" "));

            let facets: Vec<String> = listing
                .facets
                .categories
                .iter()
                .map(|facet| format!("{} ({})", facet.value, facet.count))
                .collect();
            println!("{}", format!("Categories: {}", facets.join(", ")).dimmed());
        }
    }
}
