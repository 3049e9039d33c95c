//! Integration tests for the query pipeline.
//!
//! These tests verify that filters, sorting and pagination work together
//! over a realistic catalog snapshot.

use catalog::{Catalog, Product, Rating};
use pipeline::{
    BrowseSession, CategorySelection, Facets, PriceRange, QueryPipeline, QuerySpec, SortKey,
    filter, paginate,
};

fn product(id: u32, title: &str, category: &str, price: f64, score: f32, count: u32) -> Product {
    Product {
        id,
        title: title.to_string(),
        price,
        category: category.to_string(),
        image: format!("https://img.example/{}.jpg", id),
        description: String::new(),
        rating: Rating { score, count },
    }
}

fn create_test_catalog() -> Catalog {
    Catalog::from_products(vec![
        product(1, "Slim Fit Cotton Shirt", "men's clothing", 22.3, 4.1, 259),
        product(2, "Rain Jacket", "women's clothing", 39.99, 3.8, 679),
        product(3, "Gold Plated Ring", "jewelery", 9.99, 3.0, 400),
        product(4, "Portable Hard Drive 2TB", "electronics", 64.0, 3.3, 203),
        product(5, "SSD 1TB", "electronics", 109.0, 4.8, 319),
        product(6, "Short Sleeve T-Shirt", "women's clothing", 12.99, 4.5, 146),
        product(7, "Silver Bracelet", "jewelery", 695.0, 4.6, 400),
        product(8, "Monitor 27in", "electronics", 999.99, 2.2, 140),
    ])
}

/// Raw query parameters, kept alongside the built `QuerySpec` so results can
/// be checked against a predicate written out by hand.
struct Case {
    search: &'static str,
    category: Option<&'static str>,
    min_price: Option<f64>,
    max_price: Option<f64>,
    sort: SortKey,
}

impl Case {
    fn new() -> Self {
        Case {
            search: "",
            category: None,
            min_price: None,
            max_price: None,
            sort: SortKey::None,
        }
    }

    fn query(&self) -> QuerySpec {
        QuerySpec::new()
            .with_search(self.search)
            .with_category(CategorySelection::parse(self.category.unwrap_or("any")))
            .with_price_range(PriceRange::new(self.min_price, self.max_price))
            .with_sort(self.sort)
    }

    fn satisfied_by(&self, product: &Product) -> bool {
        let needle = self.search.trim().to_lowercase();
        let text_ok = product.title.to_lowercase().contains(&needle)
            || product.category.to_lowercase().contains(&needle);
        let category_ok = self.category.is_none_or(|c| product.category == c);
        let min_ok = self.min_price.is_none_or(|min| product.price >= min);
        let max_ok = self.max_price.is_none_or(|max| product.price <= max);
        text_ok && category_ok && min_ok && max_ok
    }
}

fn cases() -> Vec<Case> {
    vec![
        Case::new(),
        Case {
            search: "shirt",
            ..Case::new()
        },
        Case {
            search: "ELECTRONICS",
            ..Case::new()
        },
        Case {
            category: Some("jewelery"),
            ..Case::new()
        },
        Case {
            category: Some("toys"),
            ..Case::new()
        },
        Case {
            min_price: Some(10.0),
            max_price: Some(100.0),
            ..Case::new()
        },
        Case {
            search: "s",
            category: Some("women's clothing"),
            min_price: Some(20.0),
            sort: SortKey::PriceDesc,
            ..Case::new()
        },
        Case {
            max_price: Some(22.3),
            sort: SortKey::PriceAsc,
            ..Case::new()
        },
        Case {
            sort: SortKey::RatingDesc,
            ..Case::new()
        },
        Case {
            sort: SortKey::PopularityDesc,
            ..Case::new()
        },
    ]
}

fn queries() -> Vec<QuerySpec> {
    cases().iter().map(Case::query).collect()
}

#[test]
fn test_results_match_hand_written_predicate() {
    let catalog = create_test_catalog();

    for case in cases() {
        let query = case.query();
        let results = filter(catalog.products(), &query);

        for item in &results {
            assert_eq!(catalog.get_product(item.id), Some(item), "{:?}", query);
        }

        let mut got: Vec<u32> = results.iter().map(|p| p.id).collect();
        let mut expected: Vec<u32> = catalog
            .products()
            .iter()
            .filter(|p| case.satisfied_by(p))
            .map(|p| p.id)
            .collect();
        if case.sort == SortKey::None {
            assert_eq!(got, expected, "unsorted results keep snapshot order for {:?}", query);
        }
        got.sort_unstable();
        expected.sort_unstable();
        assert_eq!(got, expected, "{:?}", query);
    }
}

#[test]
fn test_hand_written_predicate_agrees_with_pipeline() {
    let catalog = create_test_catalog();
    let pipeline = QueryPipeline::standard();

    for case in cases() {
        let query = case.query();
        for product in catalog.products() {
            assert_eq!(
                pipeline.matches(product, &query),
                case.satisfied_by(product),
                "product {} under {:?}",
                product.id,
                query
            );
        }
    }
}

#[test]
fn test_known_query_results() {
    let catalog = create_test_catalog();
    let ids = |query: QuerySpec| -> Vec<u32> {
        filter(catalog.products(), &query).iter().map(|p| p.id).collect()
    };

    assert_eq!(ids(QuerySpec::new().with_search("shirt")), vec![1, 6]);
    assert_eq!(ids(QuerySpec::new().with_search("ELECTRONICS")), vec![4, 5, 8]);
    assert_eq!(
        ids(QuerySpec::new().with_price_range(PriceRange::new(Some(10.0), Some(100.0)))),
        vec![1, 2, 4, 6]
    );
    // Bounds are inclusive
    assert_eq!(
        ids(QuerySpec::new()
            .with_price_range(PriceRange::new(None, Some(22.3)))
            .with_sort(SortKey::PriceAsc)),
        vec![3, 6, 1]
    );
}

#[test]
fn test_filtering_is_deterministic() {
    let catalog = create_test_catalog();

    for query in queries() {
        assert_eq!(filter(catalog.products(), &query), filter(catalog.products(), &query));
    }
}

#[test]
fn test_sort_ties_keep_snapshot_order() {
    let catalog = create_test_catalog();
    let query = QuerySpec::new().with_sort(SortKey::PopularityDesc);

    let ids: Vec<u32> = filter(catalog.products(), &query).iter().map(|p| p.id).collect();

    // Products 3 and 7 share a count of 400
    assert_eq!(ids, vec![2, 3, 7, 5, 1, 4, 6, 8]);
}

#[test]
fn test_price_range_and_sort_example() {
    let snapshot = vec![
        product(1, "A", "misc", 10.0, 0.0, 0),
        product(2, "B", "misc", 20.0, 0.0, 0),
        product(3, "C", "misc", 30.0, 0.0, 0),
    ];
    let query = QuerySpec::new()
        .with_category(CategorySelection::parse("any"))
        .with_price_range(PriceRange::new(Some(15.0), Some(30.0)))
        .with_sort(SortKey::PriceAsc);

    let prices: Vec<f64> = filter(&snapshot, &query).iter().map(|p| p.price).collect();
    assert_eq!(prices, vec![20.0, 30.0]);
}

#[test]
fn test_search_example_is_case_insensitive() {
    let snapshot = vec![
        product(1, "Blue Shirt", "misc", 10.0, 0.0, 0),
        product(2, "Red Hat", "misc", 10.0, 0.0, 0),
    ];

    for search in ["shirt", "SHIRT"] {
        let results = filter(&snapshot, &QuerySpec::new().with_search(search));
        let titles: Vec<&str> = results.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Blue Shirt"]);
    }
}

#[test]
fn test_empty_snapshot() {
    for query in queries() {
        let results = filter(&[], &query);
        let page = paginate(&results, 1, 12);

        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
    }
}

#[test]
fn test_paginate_large_result() {
    let snapshot: Vec<Product> = (1..=25)
        .map(|id| product(id, &format!("Item {}", id), "misc", id as f64, 0.0, 0))
        .collect();
    let results = filter(&snapshot, &QuerySpec::new());

    for requested in [-5, 0, 1, 3, 8] {
        let page = paginate(&results, requested, 12);
        assert_eq!(page.total_pages, 3);
        assert!((1..=3).contains(&page.page));
        assert!(page.items.len() <= 12);
    }
}

#[test]
fn test_browse_session_over_catalog() {
    let catalog = create_test_catalog();
    let mut session = BrowseSession::new(2);

    let first = session.current_page(catalog.products());
    assert_eq!(first.total_pages, 4);

    session.next_page(first.total_pages);
    session.next_page(first.total_pages);
    assert_eq!(session.current_page(catalog.products()).page, 3);

    session.set_category(CategorySelection::parse("electronics"));
    let page = session.current_page(catalog.products());
    assert_eq!(page.page, 1);
    assert_eq!(page.total_items, 3);

    let facets = Facets::compute(&filter(catalog.products(), session.query()));
    assert_eq!(facets.total, 3);
    assert_eq!(facets.price_bounds, Some((64.0, 999.99)));
}
