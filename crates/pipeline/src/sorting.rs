//! Stable ordering of filtered results.
//!
//! `slice::sort_by` is a stable merge sort, so products with equal keys
//! keep their snapshot order. Do not switch these to `sort_unstable_*`.

use crate::query::SortKey;
use catalog::Product;
use std::cmp::Reverse;

/// Sort products in place by the given key.
///
/// `SortKey::None` leaves the order untouched.
pub fn sort_products(products: &mut [Product], key: SortKey) {
    match key {
        SortKey::None => {}
        SortKey::PriceAsc => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceDesc => products.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::RatingDesc => {
            products.sort_by(|a, b| b.rating.score.total_cmp(&a.rating.score))
        }
        SortKey::PopularityDesc => products.sort_by_key(|p| Reverse(p.rating.count)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Rating;

    fn product(id: u32, price: f64, score: f32, count: u32) -> Product {
        Product {
            id,
            title: format!("Product {}", id),
            price,
            category: "misc".to_string(),
            image: String::new(),
            description: String::new(),
            rating: Rating { score, count },
        }
    }

    fn ids(products: &[Product]) -> Vec<u32> {
        products.iter().map(|p| p.id).collect()
    }

    fn create_test_products() -> Vec<Product> {
        vec![
            product(1, 30.0, 4.0, 10),
            product(2, 10.0, 4.5, 300),
            product(3, 20.0, 4.0, 10),
            product(4, 10.0, 2.0, 50),
        ]
    }

    #[test]
    fn test_no_sort_keeps_order() {
        let mut products = create_test_products();
        sort_products(&mut products, SortKey::None);
        assert_eq!(ids(&products), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_price_sorts_are_stable() {
        let mut products = create_test_products();
        sort_products(&mut products, SortKey::PriceAsc);
        // 2 and 4 share a price and keep snapshot order
        assert_eq!(ids(&products), vec![2, 4, 3, 1]);

        let mut products = create_test_products();
        sort_products(&mut products, SortKey::PriceDesc);
        assert_eq!(ids(&products), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_rating_sort_is_stable() {
        let mut products = create_test_products();
        sort_products(&mut products, SortKey::RatingDesc);
        // 1 and 3 share a score and keep snapshot order
        assert_eq!(ids(&products), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_popularity_sort_is_stable() {
        let mut products = create_test_products();
        sort_products(&mut products, SortKey::PopularityDesc);
        assert_eq!(ids(&products), vec![2, 4, 1, 3]);
    }
}
