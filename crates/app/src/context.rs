//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        carts::{CartsService, SqliteCartsService},
        checkout::{CheckoutService, SqliteCheckoutService},
        products::{
            ProductsService, ProductsServiceError, SqliteProductsService, data::default_catalog,
        },
    },
};

/// Errors raised while building the application context.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The database could not be opened.
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    /// A schema migration failed.
    #[error("failed to apply database migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),

    /// The default catalog could not be inserted.
    #[error("failed to seed product catalog")]
    Seed(#[source] ProductsServiceError),
}

/// Services shared by every entry point.
#[derive(Clone)]
pub struct AppContext {
    /// Product catalog.
    pub products: Arc<dyn ProductsService>,

    /// Live cart.
    pub carts: Arc<dyn CartsService>,

    /// Checkout and receipts.
    pub checkout: Arc<dyn CheckoutService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// Pending migrations are applied and the catalog is seeded when empty.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting, migrating or seeding fails.
    pub async fn from_database_url(url: &str, max_connections: u32) -> Result<Self, AppInitError> {
        let pool = database::connect(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        let context = Self::from_db(Db::new(pool));

        context
            .products
            .seed_products(default_catalog())
            .await
            .map_err(AppInitError::Seed)?;

        Ok(context)
    }

    /// Build application context over an already migrated database.
    #[must_use]
    pub fn from_db(db: Db) -> Self {
        Self {
            products: Arc::new(SqliteProductsService::new(db.clone())),
            carts: Arc::new(SqliteCartsService::new(db.clone())),
            checkout: Arc::new(SqliteCheckoutService::new(db)),
        }
    }
}
