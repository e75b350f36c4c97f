//! Carts service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    database::Db,
    domain::carts::{
        data::NewCartEntry,
        errors::CartsServiceError,
        models::{AddedCartEntry, Cart, CartEntryId, CartLine},
        repositories::{JoinedCartEntry, SqliteCartEntriesRepository},
    },
    pricing::{self, PricingError},
};

/// Cart service backed by `SQLite`.
#[derive(Debug, Clone)]
pub struct SqliteCartsService {
    db: Db,
    repository: SqliteCartEntriesRepository,
}

impl SqliteCartsService {
    /// Create a service over the given database handle.
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteCartEntriesRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for SqliteCartsService {
    async fn add_item(&self, item: NewCartEntry) -> Result<AddedCartEntry, CartsServiceError> {
        let product_id = item.product_id.trim();

        if product_id.is_empty() {
            return Err(CartsServiceError::InvalidInput("productId is required"));
        }

        let qty = u32::try_from(item.qty)
            .ok()
            .filter(|qty| *qty >= 1)
            .ok_or(CartsServiceError::InvalidInput("qty must be a positive integer"))?;

        let mut tx = self.db.begin_immediate().await?;

        let added = match self
            .repository
            .find_by_product(&mut tx, product_id)
            .await?
        {
            Some(existing) => {
                let merged = existing
                    .qty
                    .checked_add(qty)
                    .ok_or(CartsServiceError::InvalidInput("qty is too large"))?;

                let entry = self
                    .repository
                    .update_quantity(&mut tx, existing.id, merged)
                    .await?;

                AddedCartEntry {
                    entry,
                    created: false,
                }
            }
            None => {
                let entry = self
                    .repository
                    .create_entry(&mut tx, product_id, qty, Timestamp::now())
                    .await?;

                AddedCartEntry {
                    entry,
                    created: true,
                }
            }
        };

        tx.commit().await?;

        Ok(added)
    }

    async fn remove_item(&self, entry: CartEntryId) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_immediate().await?;

        let rows_affected = self.repository.delete_entry(&mut tx, entry).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn get_cart(&self) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let entries = self.repository.list_joined(&mut tx).await?;

        tx.commit().await?;

        price_cart(entries).map_err(CartsServiceError::from)
    }
}

/// Price joined cart entries into a cart with per-line subtotals and a total.
pub(crate) fn price_cart(entries: Vec<JoinedCartEntry>) -> Result<Cart, PricingError> {
    let items = entries
        .into_iter()
        .map(|entry| -> Result<CartLine, PricingError> {
            Ok(CartLine {
                subtotal: pricing::line_subtotal(entry.price, entry.qty)?,
                id: entry.id,
                product_id: entry.product_id,
                name: entry.name,
                price: entry.price,
                qty: entry.qty,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let total = pricing::total(items.iter().map(|line| line.subtotal))?;

    Ok(Cart { items, total })
}

/// Cart operations.
#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Adds `qty` of a product, merging into an existing entry for the same product.
    async fn add_item(&self, item: NewCartEntry) -> Result<AddedCartEntry, CartsServiceError>;

    /// Removes a single cart entry.
    async fn remove_item(&self, entry: CartEntryId) -> Result<(), CartsServiceError>;

    /// Retrieves the cart joined with the catalog, priced.
    async fn get_cart(&self) -> Result<Cart, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use tempfile::tempdir;
    use testresult::TestResult;

    use crate::{context::AppContext, test::TestContext};

    use super::*;

    fn new_entry(product_id: &str, qty: i64) -> NewCartEntry {
        NewCartEntry {
            product_id: product_id.to_string(),
            qty,
        }
    }

    #[tokio::test]
    async fn add_item_creates_entry() -> TestResult {
        let ctx = TestContext::seeded().await?;

        let added = ctx.carts.add_item(new_entry("p1", 2)).await?;

        assert!(added.created);
        assert_eq!(added.entry.product_id, "p1");
        assert_eq!(added.entry.qty, 2);

        Ok(())
    }

    #[tokio::test]
    async fn adding_same_product_twice_merges_quantity() -> TestResult {
        let ctx = TestContext::seeded().await?;

        let first = ctx.carts.add_item(new_entry("p1", 2)).await?;
        let second = ctx.carts.add_item(new_entry("p1", 3)).await?;

        assert!(!second.created, "second add should merge");
        assert_eq!(second.entry.id, first.entry.id);
        assert_eq!(second.entry.qty, 5);

        let cart = ctx.carts.get_cart().await?;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items.first().map(|line| line.qty), Some(5));

        Ok(())
    }

    #[tokio::test]
    async fn add_item_rejects_zero_quantity() -> TestResult {
        let ctx = TestContext::seeded().await?;

        let result = ctx.carts.add_item(new_entry("p1", 0)).await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidInput(_))),
            "expected InvalidInput, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_item_rejects_negative_quantity() -> TestResult {
        let ctx = TestContext::seeded().await?;

        let result = ctx.carts.add_item(new_entry("p1", -4)).await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidInput(_))),
            "expected InvalidInput, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_item_rejects_blank_product_id() -> TestResult {
        let ctx = TestContext::seeded().await?;

        let result = ctx.carts.add_item(new_entry("  ", 1)).await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidInput(_))),
            "expected InvalidInput, got {result:?}"
        );

        assert!(ctx.carts.get_cart().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn remove_item_deletes_entry() -> TestResult {
        let ctx = TestContext::seeded().await?;

        let added = ctx.carts.add_item(new_entry("p3", 1)).await?;

        ctx.carts.remove_item(added.entry.id).await?;

        assert!(ctx.carts.get_cart().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn remove_item_unknown_id_returns_not_found() -> TestResult {
        let ctx = TestContext::seeded().await?;

        let result = ctx.carts.remove_item(CartEntryId::from_i64(404)).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn remove_item_twice_returns_not_found() -> TestResult {
        let ctx = TestContext::seeded().await?;

        let added = ctx.carts.add_item(new_entry("p2", 1)).await?;

        ctx.carts.remove_item(added.entry.id).await?;

        let result = ctx.carts.remove_item(added.entry.id).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_cart_totals_follow_catalog_prices() -> TestResult {
        let ctx = TestContext::seeded().await?;

        ctx.carts.add_item(new_entry("p1", 2)).await?;

        let cart = ctx.carts.get_cart().await?;

        assert_eq!(cart.total, Decimal::new(3998, 2));

        ctx.carts.add_item(new_entry("p2", 1)).await?;

        let cart = ctx.carts.get_cart().await?;

        assert_eq!(cart.total, Decimal::new(7997, 2));
        assert_eq!(cart.items.len(), 2);

        let p1 = cart.items.iter().find(|line| line.product_id == "p1");

        assert_eq!(p1.map(|line| line.name.as_str()), Some("Vibe Tee"));
        assert_eq!(p1.map(|line| line.subtotal), Some(Decimal::new(3998, 2)));

        Ok(())
    }

    #[tokio::test]
    async fn get_cart_total_is_sum_of_rounded_subtotals() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.create_product("a", "Third", Decimal::new(3333, 3)).await?;
        ctx.create_product("b", "Half", Decimal::new(5, 3)).await?;

        ctx.carts.add_item(new_entry("a", 7)).await?;
        ctx.carts.add_item(new_entry("b", 1)).await?;

        let cart = ctx.carts.get_cart().await?;

        let expected = pricing::total(
            cart.items
                .iter()
                .map(|line| pricing::round_money(line.price * Decimal::from(line.qty))),
        )?;

        // 3.333 × 7 = 23.331 → 23.33, 0.005 × 1 → 0.01
        assert_eq!(cart.total, expected);
        assert_eq!(cart.total, Decimal::new(2334, 2));

        Ok(())
    }

    #[tokio::test]
    async fn get_cart_omits_entries_for_unknown_products() -> TestResult {
        let ctx = TestContext::seeded().await?;

        ctx.carts.add_item(new_entry("ghost", 1)).await?;
        ctx.carts.add_item(new_entry("p6", 1)).await?;

        let cart = ctx.carts.get_cart().await?;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total, Decimal::new(999, 2));

        Ok(())
    }

    #[tokio::test]
    async fn add_item_trims_product_id_before_merging() -> TestResult {
        let ctx = TestContext::seeded().await?;

        let first = ctx.carts.add_item(new_entry(" p1 ", 1)).await?;
        let second = ctx.carts.add_item(new_entry("p1", 2)).await?;

        assert_eq!(first.entry.product_id, "p1");
        assert!(!second.created, "padded and bare ids should share an entry");
        assert_eq!(second.entry.qty, 3);

        let cart = ctx.carts.get_cart().await?;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total, Decimal::new(5997, 2));

        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_adds_against_a_file_database_all_succeed() -> TestResult {
        let dir = tempdir()?;
        let url = format!("sqlite://{}", dir.path().join("storefront.sqlite").display());

        let context = AppContext::from_database_url(&url, 5).await?;

        let handles = (0..20)
            .map(|_| {
                let carts = Arc::clone(&context.carts);

                tokio::spawn(async move { carts.add_item(new_entry("p1", 1)).await })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            handle.await??;
        }

        let cart = context.carts.get_cart().await?;

        assert_eq!(cart.items.len(), 1, "all adds should merge into one entry");
        assert_eq!(cart.items.first().map(|line| line.qty), Some(20));

        Ok(())
    }

    #[test]
    fn price_cart_of_no_entries_is_empty() -> TestResult {
        let cart = price_cart(Vec::new())?;

        assert!(cart.is_empty());
        assert_eq!(cart.total, Decimal::ZERO);

        Ok(())
    }
}
