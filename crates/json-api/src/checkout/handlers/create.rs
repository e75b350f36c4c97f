//! Checkout Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use storefront_app::domain::checkout::data::{CheckoutItem, NewCheckout};

use crate::{
    checkout::errors::into_status_error, extensions::*, receipts::get::ReceiptResponse,
    state::State,
};

/// Checkout Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckoutItemRequest {
    #[serde(default)]
    pub product_id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub price: Decimal,

    #[serde(default)]
    pub qty: i64,
}

impl From<CheckoutItemRequest> for CheckoutItem {
    fn from(item: CheckoutItemRequest) -> Self {
        CheckoutItem {
            product_id: item.product_id,
            name: item.name,
            price: item.price,
            qty: item.qty,
        }
    }
}

/// Checkout Request
///
/// Without `cartItems` the live cart is billed. An empty body is treated as `{}`.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckoutRequest {
    pub cart_items: Option<Vec<CheckoutItemRequest>>,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl From<CheckoutRequest> for NewCheckout {
    fn from(request: CheckoutRequest) -> Self {
        NewCheckout {
            items: request
                .cart_items
                .map(|items| items.into_iter().map(Into::into).collect()),
            name: request.name,
            email: request.email,
        }
    }
}

impl CheckoutRequest {
    async fn from_request(req: &mut Request) -> Result<Self, StatusError> {
        let payload = req
            .payload()
            .await
            .map_err(|error| StatusError::bad_request().brief(error.to_string()))?;

        if payload.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        serde_json::from_slice(payload).map_err(|error| {
            StatusError::bad_request().brief(format!("invalid checkout body: {error}"))
        })
    }
}

/// Checkout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutResponse {
    pub receipt: ReceiptResponse,
}

/// Checkout Handler
///
/// Issues a receipt and empties the cart.
#[endpoint(
    tags("checkout"),
    summary = "Checkout",
    request_body = CheckoutRequest,
    responses(
        (status_code = StatusCode::OK, description = "Receipt issued"),
        (status_code = StatusCode::BAD_REQUEST, description = "Cart is empty or an item is invalid"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "checkout.create",
    skip(req, depot),
    fields(receipt_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CheckoutResponse>, StatusError> {
    let request = CheckoutRequest::from_request(req).await?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    let receipt = state
        .app
        .checkout
        .checkout(request.into())
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record("receipt_id", receipt.id.into_i64());

    tracing::info!(receipt_id = %receipt.id, total = %receipt.total, "issued receipt");

    Ok(Json(CheckoutResponse {
        receipt: receipt.into(),
    }))
}
