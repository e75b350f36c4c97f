//! Receipts Repository
//!
//! Receipts are append-only. The line items, customer details and timestamp are
//! kept as a JSON payload next to the numeric total so a receipt can be
//! reproduced exactly even if the catalog changes later.

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Row, Sqlite, Transaction, query_as, query_scalar, sqlite::SqliteRow};

use crate::{
    database::{try_get_decimal, try_get_timestamp},
    domain::checkout::models::{Receipt, ReceiptId, ReceiptLine},
};

const CREATE_RECEIPT_SQL: &str = include_str!("sql/create_receipt.sql");
const GET_RECEIPT_SQL: &str = include_str!("sql/get_receipt.sql");

/// A priced receipt that has not been assigned an id yet.
#[derive(Debug, Clone)]
pub(crate) struct NewReceipt {
    pub(crate) total: Decimal,
    pub(crate) items: Vec<ReceiptLine>,
    pub(crate) name: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) created_at: Timestamp,
}

impl NewReceipt {
    pub(crate) fn into_receipt(self, id: ReceiptId) -> Receipt {
        Receipt {
            id,
            total: self.total,
            items: self.items,
            name: self.name,
            email: self.email,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReceiptPayload {
    total: Decimal,
    items: Vec<ReceiptPayloadLine>,
    name: Option<String>,
    email: Option<String>,
    timestamp: Timestamp,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReceiptPayloadLine {
    product_id: String,
    name: String,
    price: Decimal,
    qty: u32,
    subtotal: Decimal,
}

impl From<&NewReceipt> for ReceiptPayload {
    fn from(receipt: &NewReceipt) -> Self {
        Self {
            total: receipt.total,
            items: receipt
                .items
                .iter()
                .map(|line| ReceiptPayloadLine {
                    product_id: line.product_id.clone(),
                    name: line.name.clone(),
                    price: line.price,
                    qty: line.qty,
                    subtotal: line.subtotal,
                })
                .collect(),
            name: receipt.name.clone(),
            email: receipt.email.clone(),
            timestamp: receipt.created_at,
        }
    }
}

impl From<ReceiptPayloadLine> for ReceiptLine {
    fn from(line: ReceiptPayloadLine) -> Self {
        Self {
            product_id: line.product_id,
            name: line.name,
            price: line.price,
            qty: line.qty,
            subtotal: line.subtotal,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteReceiptsRepository;

impl SqliteReceiptsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_receipt(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        receipt: &NewReceipt,
    ) -> Result<ReceiptId, sqlx::Error> {
        let payload = serde_json::to_string(&ReceiptPayload::from(receipt))
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        let id: i64 = query_scalar(CREATE_RECEIPT_SQL)
            .bind(receipt.total.to_string())
            .bind(payload)
            .bind(receipt.created_at.as_millisecond())
            .fetch_one(&mut **tx)
            .await?;

        Ok(ReceiptId::from_i64(id))
    }

    pub(crate) async fn get_receipt(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        receipt: ReceiptId,
    ) -> Result<Receipt, sqlx::Error> {
        query_as::<Sqlite, Receipt>(GET_RECEIPT_SQL)
            .bind(receipt.into_i64())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for Receipt {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let payload: String = row.try_get("payload")?;

        let payload: ReceiptPayload =
            serde_json::from_str(&payload).map_err(|e| sqlx::Error::ColumnDecode {
                index: "payload".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: ReceiptId::from_i64(row.try_get("id")?),
            total: try_get_decimal(row, "total")?,
            items: payload.items.into_iter().map(ReceiptLine::from).collect(),
            name: payload.name,
            email: payload.email,
            created_at: try_get_timestamp(row, "created_at")?,
        })
    }
}
