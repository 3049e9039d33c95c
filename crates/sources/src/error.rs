//! Errors produced by product sources.

use catalog::CatalogError;
use thiserror::Error;

/// Errors that can occur when fetching from a product source
///
/// Callers treat every variant the same way (fall back, never crash); the
/// split exists for logging.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The source could not be reached (connection, timeout, missing file)
    #[error("Product source unavailable: {0}")]
    Transport(String),

    /// The source answered with a non-success status
    #[error("Product source returned {status} for {url}")]
    Status { status: u16, url: String },

    /// The source answered but the payload could not be decoded
    #[error("Malformed product source response: {0}")]
    Malformed(#[from] CatalogError),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Transport(err.to_string())
    }
}

/// Result type alias for source operations
pub type Result<T> = std::result::Result<T, SourceError>;
