//! Get Receipt Handler

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::checkout::models::{Receipt, ReceiptId, ReceiptLine};

use crate::{checkout::errors::into_status_error, extensions::*, state::State};

/// Receipt Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReceiptLineResponse {
    pub product_id: String,
    pub name: String,

    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub price: Decimal,

    pub qty: u32,

    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub subtotal: Decimal,
}

impl From<ReceiptLine> for ReceiptLineResponse {
    fn from(line: ReceiptLine) -> Self {
        Self {
            product_id: line.product_id,
            name: line.name,
            price: line.price,
            qty: line.qty,
            subtotal: line.subtotal,
        }
    }
}

/// Receipt Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReceiptResponse {
    pub id: i64,

    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub total: Decimal,

    pub items: Vec<ReceiptLineResponse>,
    pub name: Option<String>,
    pub email: Option<String>,

    /// When the receipt was issued (ISO-8601)
    #[salvo(schema(value_type = String))]
    pub timestamp: Timestamp,
}

impl From<Receipt> for ReceiptResponse {
    fn from(receipt: Receipt) -> Self {
        Self {
            id: receipt.id.into_i64(),
            total: receipt.total,
            items: receipt.items.into_iter().map(Into::into).collect(),
            name: receipt.name,
            email: receipt.email,
            timestamp: receipt.created_at,
        }
    }
}

/// Get Receipt Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct GetReceiptResponse {
    pub receipt: ReceiptResponse,
}

/// Get Receipt Handler
#[endpoint(
    tags("receipts"),
    summary = "Get Receipt",
    responses(
        (status_code = StatusCode::OK, description = "Receipt"),
        (status_code = StatusCode::NOT_FOUND, description = "Receipt not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<GetReceiptResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let receipt = state
        .app
        .checkout
        .get_receipt(ReceiptId::from_i64(id.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(GetReceiptResponse {
        receipt: receipt.into(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::checkout::{CheckoutServiceError, MockCheckoutService};

    use crate::test_helpers::{checkout_service, make_receipt};

    use super::*;

    fn make_service(repo: MockCheckoutService) -> Service {
        checkout_service(repo, Router::with_path("receipts/{id}").get(handler))
    }

    #[tokio::test]
    async fn test_get_receipt_success() -> TestResult {
        let mut repo = MockCheckoutService::new();

        repo.expect_get_receipt()
            .once()
            .withf(|id| *id == ReceiptId::from_i64(5))
            .return_once(|_| Ok(make_receipt(5)));

        repo.expect_checkout().never();

        let mut res = TestClient::get("http://example.com/receipts/5")
            .send(&make_service(repo))
            .await;

        let body: GetReceiptResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.receipt.id, 5);
        assert_eq!(body.receipt.items.len(), 1);
        assert_eq!(body.receipt.name.as_deref(), Some("Ada"));
        assert_eq!(body.receipt.timestamp, Timestamp::UNIX_EPOCH);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_unknown_receipt_returns_404() -> TestResult {
        let mut repo = MockCheckoutService::new();

        repo.expect_get_receipt()
            .once()
            .return_once(|_| Err(CheckoutServiceError::NotFound));

        repo.expect_checkout().never();

        let res = TestClient::get("http://example.com/receipts/9")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_receipt_non_integer_id_returns_400() -> TestResult {
        let mut repo = MockCheckoutService::new();

        repo.expect_get_receipt().never();
        repo.expect_checkout().never();

        let res = TestClient::get("http://example.com/receipts/latest")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
