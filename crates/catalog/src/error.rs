//! Error types for the catalog crate.
//!
//! Everything that can go wrong while turning a product payload into a
//! validated [`Catalog`](crate::Catalog) ends up here.

use thiserror::Error;

/// Errors that can occur while decoding or validating product data
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Payload was not valid JSON or did not match the product shape
    #[error("Malformed product payload: {0}")]
    ParseError(#[from] serde_json::Error),

    /// A product field had an invalid value
    #[error("Invalid value for {field} on product {id}: {value}")]
    InvalidValue {
        id: u32,
        field: &'static str,
        value: String,
    },

    /// Two records in the same payload share an identifier
    #[error("Duplicate product id: {0}")]
    DuplicateId(u32),
}

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
