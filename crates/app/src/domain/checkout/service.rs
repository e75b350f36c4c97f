//! Checkout service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::{error, info};

use crate::{
    database::Db,
    domain::{
        carts::{models::Cart, repositories::SqliteCartEntriesRepository, service::price_cart},
        checkout::{
            data::{CheckoutItem, NewCheckout},
            errors::CheckoutServiceError,
            models::{Receipt, ReceiptId, ReceiptLine},
            repository::{NewReceipt, SqliteReceiptsRepository},
        },
    },
    pricing,
};

/// Checkout service backed by `SQLite`.
#[derive(Debug, Clone)]
pub struct SqliteCheckoutService {
    db: Db,
    carts: SqliteCartEntriesRepository,
    receipts: SqliteReceiptsRepository,
}

impl SqliteCheckoutService {
    /// Create a service over the given database handle.
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts: SqliteCartEntriesRepository::new(),
            receipts: SqliteReceiptsRepository::new(),
        }
    }

    /// Empty the live cart once the receipt is durable.
    ///
    /// The receipt has already been committed, so a failure here is logged and
    /// the checkout still succeeds.
    async fn clear_cart(&self, receipt: ReceiptId) {
        let cleared = async {
            let mut tx = self.db.begin_immediate().await?;
            let rows = self.carts.clear(&mut tx).await?;
            tx.commit().await?;

            Ok::<u64, sqlx::Error>(rows)
        }
        .await;

        match cleared {
            Ok(rows) => info!(receipt = %receipt, cleared = rows, "cleared cart after checkout"),
            Err(err) => {
                error!(receipt = %receipt, error = %err, "failed to clear cart after checkout");
            }
        }
    }
}

#[async_trait]
impl CheckoutService for SqliteCheckoutService {
    async fn checkout(&self, checkout: NewCheckout) -> Result<Receipt, CheckoutServiceError> {
        let explicit = checkout.items.filter(|items| !items.is_empty());

        let explicit_lines = explicit.map(price_items).transpose()?;

        let mut tx = self.db.begin_immediate().await?;

        let items = match explicit_lines {
            Some(lines) => lines,
            None => {
                let entries = self.carts.list_joined(&mut tx).await?;

                receipt_lines(price_cart(entries)?)
            }
        };

        if items.is_empty() {
            return Err(CheckoutServiceError::EmptyCart);
        }

        let total = pricing::total(items.iter().map(|line| line.subtotal))?;

        let receipt = NewReceipt {
            total,
            items,
            name: non_blank(checkout.name),
            email: non_blank(checkout.email),
            created_at: Timestamp::now(),
        };

        let id = self.receipts.create_receipt(&mut tx, &receipt).await?;

        tx.commit().await?;

        self.clear_cart(id).await;

        Ok(receipt.into_receipt(id))
    }

    async fn get_receipt(&self, receipt: ReceiptId) -> Result<Receipt, CheckoutServiceError> {
        let mut tx = self.db.begin().await?;

        let receipt = self.receipts.get_receipt(&mut tx, receipt).await?;

        tx.commit().await?;

        Ok(receipt)
    }
}

fn price_items(items: Vec<CheckoutItem>) -> Result<Vec<ReceiptLine>, CheckoutServiceError> {
    items
        .into_iter()
        .map(|item| -> Result<ReceiptLine, CheckoutServiceError> {
            if item.product_id.trim().is_empty() {
                return Err(CheckoutServiceError::InvalidInput("productId is required"));
            }

            if item.price < Decimal::ZERO {
                return Err(CheckoutServiceError::InvalidInput(
                    "price must not be negative",
                ));
            }

            let qty = u32::try_from(item.qty)
                .ok()
                .filter(|qty| *qty >= 1)
                .ok_or(CheckoutServiceError::InvalidInput(
                    "qty must be a positive integer",
                ))?;

            Ok(ReceiptLine {
                subtotal: pricing::line_subtotal(item.price, qty)?,
                product_id: item.product_id,
                name: item.name,
                price: item.price,
                qty,
            })
        })
        .collect()
}

fn receipt_lines(cart: Cart) -> Vec<ReceiptLine> {
    cart.items
        .into_iter()
        .map(|line| ReceiptLine {
            product_id: line.product_id,
            name: line.name,
            price: line.price,
            qty: line.qty,
            subtotal: line.subtotal,
        })
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Checkout and receipt operations.
#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Bills either the supplied items or the live cart, persists a receipt and
    /// empties the cart.
    async fn checkout(&self, checkout: NewCheckout) -> Result<Receipt, CheckoutServiceError>;

    /// Reads a previously issued receipt.
    async fn get_receipt(&self, receipt: ReceiptId) -> Result<Receipt, CheckoutServiceError>;
}

#[cfg(test)]
mod tests {
    use sqlx::query_scalar;
    use testresult::TestResult;

    use crate::{
        domain::carts::{CartsService, data::NewCartEntry},
        test::TestContext,
    };

    use super::*;

    async fn add(ctx: &TestContext, product_id: &str, qty: i64) -> TestResult {
        ctx.carts
            .add_item(NewCartEntry {
                product_id: product_id.to_string(),
                qty,
            })
            .await?;

        Ok(())
    }

    async fn receipt_count(ctx: &TestContext) -> Result<i64, sqlx::Error> {
        query_scalar("SELECT COUNT(*) FROM receipts")
            .fetch_one(ctx.db.pool())
            .await
    }

    fn custom_item(qty: i64, price: Decimal) -> CheckoutItem {
        CheckoutItem {
            product_id: "x".to_string(),
            name: "Custom".to_string(),
            price,
            qty,
        }
    }

    #[tokio::test]
    async fn checkout_bills_live_cart_and_clears_it() -> TestResult {
        let ctx = TestContext::seeded().await?;

        add(&ctx, "p1", 2).await?;
        add(&ctx, "p2", 1).await?;

        let receipt = ctx.checkout.checkout(NewCheckout::default()).await?;

        assert_eq!(receipt.total, Decimal::new(7997, 2));
        assert_eq!(receipt.items.len(), 2);
        assert_eq!(
            receipt.items.first().map(|line| line.subtotal),
            Some(Decimal::new(3998, 2))
        );

        assert!(ctx.carts.get_cart().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn explicit_items_take_precedence_over_live_cart() -> TestResult {
        let ctx = TestContext::seeded().await?;

        add(&ctx, "p5", 1).await?;

        let receipt = ctx
            .checkout
            .checkout(NewCheckout {
                items: Some(vec![custom_item(3, Decimal::from(10))]),
                ..NewCheckout::default()
            })
            .await?;

        assert_eq!(receipt.total, Decimal::new(3000, 2));
        assert_eq!(receipt.items.len(), 1);
        assert_eq!(
            receipt.items.first().map(|line| line.product_id.as_str()),
            Some("x")
        );

        assert!(
            ctx.carts.get_cart().await?.is_empty(),
            "live cart should be cleared even when it was not billed"
        );

        Ok(())
    }

    #[tokio::test]
    async fn empty_explicit_items_fall_back_to_live_cart() -> TestResult {
        let ctx = TestContext::seeded().await?;

        add(&ctx, "p6", 2).await?;

        let receipt = ctx
            .checkout
            .checkout(NewCheckout {
                items: Some(Vec::new()),
                ..NewCheckout::default()
            })
            .await?;

        assert_eq!(receipt.total, Decimal::new(1998, 2));

        Ok(())
    }

    #[tokio::test]
    async fn checkout_of_empty_cart_persists_nothing() -> TestResult {
        let ctx = TestContext::seeded().await?;

        let result = ctx.checkout.checkout(NewCheckout::default()).await;

        assert!(
            matches!(result, Err(CheckoutServiceError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );

        assert_eq!(receipt_count(&ctx).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn cart_of_only_unknown_products_counts_as_empty() -> TestResult {
        let ctx = TestContext::seeded().await?;

        add(&ctx, "ghost", 1).await?;

        let result = ctx.checkout.checkout(NewCheckout::default()).await;

        assert!(
            matches!(result, Err(CheckoutServiceError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn failed_cart_clear_still_returns_persisted_receipt() -> TestResult {
        let ctx = TestContext::seeded().await?;

        add(&ctx, "p1", 1).await?;

        sqlx::query(
            "CREATE TRIGGER keep_cart BEFORE DELETE ON cart \
             BEGIN SELECT RAISE(ABORT, 'cart is locked'); END",
        )
        .execute(ctx.db.pool())
        .await?;

        let receipt = ctx.checkout.checkout(NewCheckout::default()).await?;

        assert_eq!(receipt.total, Decimal::new(1999, 2));
        assert_eq!(receipt_count(&ctx).await?, 1);

        let stored = ctx.checkout.get_receipt(receipt.id).await?;

        assert_eq!(stored.items, receipt.items);

        let cart = ctx.carts.get_cart().await?;

        assert_eq!(cart.items.len(), 1, "cart entries should survive the failed clear");

        Ok(())
    }

    #[tokio::test]
    async fn receipt_ids_strictly_increase() -> TestResult {
        let ctx = TestContext::seeded().await?;

        add(&ctx, "p7", 1).await?;
        let first = ctx.checkout.checkout(NewCheckout::default()).await?;

        add(&ctx, "p8", 4).await?;
        let second = ctx.checkout.checkout(NewCheckout::default()).await?;

        assert!(second.id > first.id, "receipt ids should increase");
        assert_eq!(receipt_count(&ctx).await?, 2);

        Ok(())
    }

    #[tokio::test]
    async fn blank_name_and_email_are_stored_as_absent() -> TestResult {
        let ctx = TestContext::seeded().await?;

        add(&ctx, "p4", 1).await?;

        let receipt = ctx
            .checkout
            .checkout(NewCheckout {
                items: None,
                name: Some(String::new()),
                email: Some("ada@example.com".to_string()),
            })
            .await?;

        assert_eq!(receipt.name, None);
        assert_eq!(receipt.email.as_deref(), Some("ada@example.com"));

        Ok(())
    }

    #[tokio::test]
    async fn get_receipt_reads_back_what_checkout_returned() -> TestResult {
        let ctx = TestContext::seeded().await?;

        add(&ctx, "p3", 2).await?;

        let issued = ctx
            .checkout
            .checkout(NewCheckout {
                items: None,
                name: Some("Ada".to_string()),
                email: None,
            })
            .await?;

        let stored = ctx.checkout.get_receipt(issued.id).await?;

        assert_eq!(stored.id, issued.id);
        assert_eq!(stored.total, Decimal::new(9998, 2));
        assert_eq!(stored.items, issued.items);
        assert_eq!(stored.name.as_deref(), Some("Ada"));
        assert_eq!(
            stored.created_at.as_millisecond(),
            issued.created_at.as_millisecond()
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_receipt_unknown_id_returns_not_found() -> TestResult {
        let ctx = TestContext::seeded().await?;

        let result = ctx.checkout.get_receipt(ReceiptId::from_i64(99)).await;

        assert!(
            matches!(result, Err(CheckoutServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn invalid_explicit_items_are_rejected() -> TestResult {
        let ctx = TestContext::seeded().await?;

        add(&ctx, "p1", 1).await?;

        for item in [
            custom_item(0, Decimal::ONE),
            custom_item(-2, Decimal::ONE),
            custom_item(1, Decimal::NEGATIVE_ONE),
            CheckoutItem {
                product_id: " ".to_string(),
                ..custom_item(1, Decimal::ONE)
            },
        ] {
            let result = ctx
                .checkout
                .checkout(NewCheckout {
                    items: Some(vec![item]),
                    ..NewCheckout::default()
                })
                .await;

            assert!(
                matches!(result, Err(CheckoutServiceError::InvalidInput(_))),
                "expected InvalidInput, got {result:?}"
            );
        }

        assert_eq!(receipt_count(&ctx).await?, 0);
        assert!(
            !ctx.carts.get_cart().await?.is_empty(),
            "a rejected checkout must leave the cart alone"
        );

        Ok(())
    }
}
