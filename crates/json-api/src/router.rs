//! App Router

use salvo::Router;

use crate::{carts, checkout, healthcheck, products, receipts};

/// Routes served under `/api`.
pub(crate) fn api_router() -> Router {
    Router::with_path("api")
        .push(Router::with_path("health").get(healthcheck::handler))
        .push(Router::with_path("products").get(products::index::handler))
        .push(
            Router::with_path("cart")
                .get(carts::get::handler)
                .post(carts::create::handler)
                .push(Router::with_path("{id}").delete(carts::delete::handler)),
        )
        .push(Router::with_path("checkout").post(checkout::create::handler))
        .push(Router::with_path("receipts/{id}").get(receipts::get::handler))
}
