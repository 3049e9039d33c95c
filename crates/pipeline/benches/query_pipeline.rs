//! Benchmarks for the listing query pipeline
//!
//! Run with: cargo bench --package pipeline
//!
//! Uses a synthetic snapshot a few times larger than a typical storefront.

use catalog::{Product, Rating};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pipeline::{CategorySelection, Facets, PriceRange, QuerySpec, SortKey, filter, paginate};

const CATEGORIES: [&str; 4] = ["electronics", "jewelery", "men's clothing", "women's clothing"];

fn create_snapshot(count: u32) -> Vec<Product> {
    (1..=count)
        .map(|id| Product {
            id,
            title: format!("Product {} {}", id, if id % 3 == 0 { "Shirt" } else { "Gadget" }),
            price: (id % 500) as f64 + 0.99,
            category: CATEGORIES[id as usize % CATEGORIES.len()].to_string(),
            image: String::new(),
            description: String::new(),
            rating: Rating {
                score: (id % 50) as f32 / 10.0,
                count: id * 7 % 1000,
            },
        })
        .collect()
}

fn bench_filter_all(c: &mut Criterion) {
    let snapshot = create_snapshot(5_000);
    let query = QuerySpec::new();

    c.bench_function("filter_all", |b| {
        b.iter(|| {
            let results = filter(black_box(&snapshot), black_box(&query));
            black_box(results)
        })
    });
}

fn bench_filter_combined(c: &mut Criterion) {
    let snapshot = create_snapshot(5_000);
    let query = QuerySpec::new()
        .with_search("shirt")
        .with_category(CategorySelection::parse("electronics"))
        .with_price_range(PriceRange::new(Some(50.0), Some(400.0)))
        .with_sort(SortKey::RatingDesc);

    c.bench_function("filter_combined", |b| {
        b.iter(|| {
            let results = filter(black_box(&snapshot), black_box(&query));
            let page = paginate(&results, black_box(2), 12);
            black_box(page)
        })
    });
}

fn bench_facets(c: &mut Criterion) {
    let snapshot = create_snapshot(5_000);

    c.bench_function("compute_facets", |b| {
        b.iter(|| black_box(Facets::compute(black_box(&snapshot))))
    });
}

criterion_group!(benches, bench_filter_all, bench_filter_combined, bench_facets);
criterion_main!(benches);
