//! Parser for product payloads.
//!
//! Handles the two shapes the product source serves:
//! - listing: a JSON array of products
//! - detail: a single product object, or an empty body / `null` when the
//!   id is unknown
//!
//! Every decoded record is validated before it leaves this module.
//! Invalid listing records are skipped; an invalid detail record is an
//! error.

use crate::error::{CatalogError, Result};
use crate::types::*;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Parse a listing payload (JSON array of products).
///
/// Malformed JSON fails the whole payload. Records that decode but fail
/// validation are dropped with a warning so one bad record cannot hide
/// the rest of the listing.
pub fn parse_products(bytes: &[u8]) -> Result<Vec<Product>> {
    let products: Vec<Product> = serde_json::from_slice(bytes)?;
    let decoded = products.len();

    let valid: Vec<Product> = products
        .into_iter()
        .filter(|product| match validate_product(product) {
            Ok(()) => true,
            Err(e) => {
                warn!("Skipping product record: {}", e);
                false
            }
        })
        .collect();

    if valid.len() < decoded {
        warn!("Kept {} of {} product records", valid.len(), decoded);
    }
    Ok(valid)
}

/// Parse a detail payload.
///
/// # Returns
/// * `Ok(Some(product))` - a valid product record
/// * `Ok(None)` - the body was empty or `null` (unknown id)
/// * `Err` - malformed JSON or an invalid record
pub fn parse_product(bytes: &[u8]) -> Result<Option<Product>> {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(None);
    }

    let product: Option<Product> = serde_json::from_slice(bytes)?;
    if let Some(product) = &product {
        validate_product(product)?;
    }
    Ok(product)
}

/// Read and parse a listing payload stored on disk.
pub fn parse_products_file(path: &Path) -> Result<Vec<Product>> {
    let bytes = fs::read(path)?;
    parse_products(&bytes)
}

/// Check the value ranges serde cannot express.
///
/// - price must be finite and non-negative
/// - rating score must be within 0.0 - 5.0
pub fn validate_product(product: &Product) -> Result<()> {
    if !product.price.is_finite() || product.price < 0.0 {
        return Err(CatalogError::InvalidValue {
            id: product.id,
            field: "price",
            value: product.price.to_string(),
        });
    }
    if !(0.0..=5.0).contains(&product.rating.score) {
        return Err(CatalogError::InvalidValue {
            id: product.id,
            field: "rating.rate",
            value: product.rating.score.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"[
        {
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        },
        {
            "id": 2,
            "title": "Mens Casual Premium Slim Fit T-Shirts",
            "price": 22.3,
            "category": "men's clothing",
            "rating": { "rate": 4.1, "count": 259 }
        }
    ]"#;

    #[test]
    fn test_parse_products() {
        let products = parse_products(LISTING.as_bytes()).unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, 1);
        assert_eq!(products[0].rating.score, 3.9);
        assert_eq!(products[0].rating.count, 120);
        // Optional fields fall back to defaults
        assert_eq!(products[1].description, "");
        assert_eq!(products[1].image, "");
    }

    #[test]
    fn test_parse_products_rejects_garbage() {
        let result = parse_products(b"<html>502 Bad Gateway</html>");
        assert!(matches!(result, Err(CatalogError::ParseError(_))));
    }

    #[test]
    fn test_parse_products_skips_invalid_records() {
        let payload = r#"[
            {"id": 7, "title": "x", "price": -1.0, "category": "c"},
            {"id": 3, "title": "y", "price": 1.0, "category": "c", "rating": {"rate": 5.01, "count": 1}},
            {"id": 4, "title": "z", "price": 2.0, "category": "c", "rating": {"rate": 5.0, "count": 1}}
        ]"#;
        let products = parse_products(payload.as_bytes()).unwrap();

        let ids: Vec<ProductId> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![4]);
    }

    #[test]
    fn test_validate_product_reports_field() {
        let payload = r#"{"id": 7, "title": "x", "price": -1.0, "category": "c"}"#;
        let result = parse_product(payload.as_bytes());

        match result {
            Err(CatalogError::InvalidValue { id, field, .. }) => {
                assert_eq!(id, 7);
                assert_eq!(field, "price");
            }
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_product_detail() {
        let payload = r#"{"id": 5, "title": "Ring", "price": 695, "category": "jewelery",
                          "rating": {"rate": 4.6, "count": 400}}"#;
        let product = parse_product(payload.as_bytes()).unwrap().unwrap();

        assert_eq!(product.id, 5);
        assert_eq!(product.price, 695.0);
    }

    #[test]
    fn test_parse_product_empty_body_is_missing() {
        assert!(parse_product(b"").unwrap().is_none());
        assert!(parse_product(b"  \n").unwrap().is_none());
        assert!(parse_product(b"null").unwrap().is_none());
    }

    #[test]
    fn test_parse_products_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        fs::write(&path, LISTING).unwrap();

        let products = parse_products_file(&path).unwrap();
        assert_eq!(products.len(), 2);

        let missing = parse_products_file(&dir.path().join("nope.json"));
        assert!(matches!(missing, Err(CatalogError::IoError(_))));
    }
}
