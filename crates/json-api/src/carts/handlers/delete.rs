//! Remove From Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::carts::models::CartEntryId;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Cart Entry Removed Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartEntryRemovedResponse {
    pub success: bool,
}

/// Remove From Cart Handler
#[endpoint(
    tags("cart"),
    summary = "Remove Cart Entry",
    responses(
        (status_code = StatusCode::OK, description = "Cart entry removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart entry not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "cart.remove",
    skip(id, depot),
    fields(entry_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    id: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<CartEntryRemovedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let entry = CartEntryId::from_i64(id.into_inner());

    tracing::Span::current().record("entry_id", entry.into_i64());

    state
        .app
        .carts
        .remove_item(entry)
        .await
        .map_err(into_status_error)?;

    tracing::info!(entry_id = %entry, "removed cart entry");

    Ok(Json(CartEntryRemovedResponse { success: true }))
}
