//! Add To Cart Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::carts::{data::NewCartEntry, models::CartEntry};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Add To Cart Request
///
/// Missing fields are left for the service to reject, so every invalid
/// payload gets the same 400 reason.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddToCartRequest {
    #[serde(default)]
    pub product_id: String,

    #[serde(default)]
    pub qty: i64,
}

impl From<AddToCartRequest> for NewCartEntry {
    fn from(request: AddToCartRequest) -> Self {
        NewCartEntry {
            product_id: request.product_id,
            qty: request.qty,
        }
    }
}

/// Cart Entry Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartEntryResponse {
    pub id: i64,
    pub product_id: String,

    /// Quantity after merging
    pub qty: u32,
}

impl From<CartEntry> for CartEntryResponse {
    fn from(entry: CartEntry) -> Self {
        Self {
            id: entry.id.into_i64(),
            product_id: entry.product_id,
            qty: entry.qty,
        }
    }
}

/// Add To Cart Handler
///
/// Merges into the existing entry for the product when there is one.
#[endpoint(
    tags("cart"),
    summary = "Add To Cart",
    responses(
        (status_code = StatusCode::CREATED, description = "Cart entry created"),
        (status_code = StatusCode::OK, description = "Quantity merged into existing entry"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "cart.add",
    skip(json, depot, res),
    fields(product_id = tracing::field::Empty, entry_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddToCartRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartEntryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("product_id", request.product_id.as_str());

    let added = state
        .app
        .carts
        .add_item(request.into())
        .await
        .map_err(into_status_error)?;

    span.record("entry_id", added.entry.id.into_i64());

    if added.created {
        res.add_header(LOCATION, format!("/api/cart/{}", added.entry.id), true)
            .or_500("failed to set location header")?
            .status_code(StatusCode::CREATED);
    } else {
        res.status_code(StatusCode::OK);
    }

    Ok(Json(added.entry.into()))
}
