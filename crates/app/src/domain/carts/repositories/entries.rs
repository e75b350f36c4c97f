//! Cart Entries Repository

use jiff::Timestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};

use crate::{
    database::{try_get_decimal, try_get_quantity, try_get_timestamp},
    domain::carts::models::{CartEntry, CartEntryId},
};

const FIND_CART_ENTRY_BY_PRODUCT_SQL: &str = include_str!("../sql/find_cart_entry_by_product.sql");
const CREATE_CART_ENTRY_SQL: &str = include_str!("../sql/create_cart_entry.sql");
const UPDATE_CART_ENTRY_QTY_SQL: &str = include_str!("../sql/update_cart_entry_qty.sql");
const DELETE_CART_ENTRY_SQL: &str = include_str!("../sql/delete_cart_entry.sql");
const LIST_CART_LINES_SQL: &str = include_str!("../sql/list_cart_lines.sql");
const CLEAR_CART_SQL: &str = include_str!("../sql/clear_cart.sql");

/// A cart entry row joined with the name and price of its product.
#[derive(Debug, Clone)]
pub(crate) struct JoinedCartEntry {
    pub(crate) id: CartEntryId,
    pub(crate) product_id: String,
    pub(crate) name: String,
    pub(crate) price: Decimal,
    pub(crate) qty: u32,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCartEntriesRepository;

impl SqliteCartEntriesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_by_product(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product_id: &str,
    ) -> Result<Option<CartEntry>, sqlx::Error> {
        query_as::<Sqlite, CartEntry>(FIND_CART_ENTRY_BY_PRODUCT_SQL)
            .bind(product_id)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_entry(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product_id: &str,
        qty: u32,
        created_at: Timestamp,
    ) -> Result<CartEntry, sqlx::Error> {
        query_as::<Sqlite, CartEntry>(CREATE_CART_ENTRY_SQL)
            .bind(product_id)
            .bind(i64::from(qty))
            .bind(created_at.as_millisecond())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_quantity(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        entry: CartEntryId,
        qty: u32,
    ) -> Result<CartEntry, sqlx::Error> {
        query_as::<Sqlite, CartEntry>(UPDATE_CART_ENTRY_QTY_SQL)
            .bind(entry.into_i64())
            .bind(i64::from(qty))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_entry(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        entry: CartEntryId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ENTRY_SQL)
            .bind(entry.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Entries whose product no longer exists are dropped by the join.
    pub(crate) async fn list_joined(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<JoinedCartEntry>, sqlx::Error> {
        query_as::<Sqlite, JoinedCartEntry>(LIST_CART_LINES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn clear(&self, tx: &mut Transaction<'_, Sqlite>) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_SQL)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for CartEntry {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CartEntryId::from_i64(row.try_get("id")?),
            product_id: row.try_get("product_id")?,
            qty: try_get_quantity(row, "qty")?,
            created_at: try_get_timestamp(row, "created_at")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for JoinedCartEntry {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CartEntryId::from_i64(row.try_get("id")?),
            product_id: row.try_get("product_id")?,
            name: row.try_get("name")?,
            price: try_get_decimal(row, "price")?,
            qty: try_get_quantity(row, "qty")?,
        })
    }
}
