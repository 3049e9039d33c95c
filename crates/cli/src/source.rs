//! Product source selected on the command line.

use catalog::{Product, ProductId};
use sources::{FileProductSource, HttpProductSource, ProductSource, Result};

/// Either the live API or a saved listing file.
pub enum CatalogSource {
    Http(HttpProductSource),
    File(FileProductSource),
}

impl ProductSource for CatalogSource {
    fn name(&self) -> &str {
        match self {
            CatalogSource::Http(source) => source.name(),
            CatalogSource::File(source) => source.name(),
        }
    }

    async fn fetch_products(&self) -> Result<Vec<Product>> {
        match self {
            CatalogSource::Http(source) => source.fetch_products().await,
            CatalogSource::File(source) => source.fetch_products().await,
        }
    }

    async fn fetch_product(&self, id: ProductId) -> Result<Option<Product>> {
        match self {
            CatalogSource::Http(source) => source.fetch_product(id).await,
            CatalogSource::File(source) => source.fetch_product(id).await,
        }
    }
}
