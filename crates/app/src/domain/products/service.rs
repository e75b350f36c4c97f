//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::products::{
        data::NewProduct, errors::ProductsServiceError, models::Product,
        repository::SqliteProductsRepository,
    },
};

/// Catalog service backed by `SQLite`.
#[derive(Debug, Clone)]
pub struct SqliteProductsService {
    db: Db,
    repository: SqliteProductsRepository,
}

impl SqliteProductsService {
    /// Create a service over the given database handle.
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for SqliteProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn seed_products(&self, products: Vec<NewProduct>) -> Result<u64, ProductsServiceError> {
        let mut tx = self.db.begin_immediate().await?;

        if self.repository.count_products(&mut tx).await? > 0 {
            return Ok(0);
        }

        let mut seeded = 0;

        for product in products {
            self.repository.create_product(&mut tx, product).await?;
            seeded += 1;
        }

        tx.commit().await?;

        info!(seeded, "seeded product catalog");

        Ok(seeded)
    }
}

/// Catalog operations.
#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products in storage order.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Inserts the given products when the catalog is empty.
    ///
    /// Returns the number of products inserted, which is zero when the catalog
    /// already had products.
    async fn seed_products(&self, products: Vec<NewProduct>) -> Result<u64, ProductsServiceError>;
}
