//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use storefront_app::{
    context::AppContext,
    domain::{
        carts::MockCartsService,
        checkout::{
            MockCheckoutService,
            models::{Receipt, ReceiptId, ReceiptLine},
        },
        products::MockProductsService,
    },
};

use crate::state::State;

pub(crate) fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_seed_products().never();

    products
}

pub(crate) fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_add_item().never();
    carts.expect_remove_item().never();
    carts.expect_get_cart().never();

    carts
}

pub(crate) fn strict_checkout_mock() -> MockCheckoutService {
    let mut checkout = MockCheckoutService::new();

    checkout.expect_checkout().never();
    checkout.expect_get_receipt().never();

    checkout
}

fn state(
    products: MockProductsService,
    carts: MockCartsService,
    checkout: MockCheckoutService,
) -> Arc<State> {
    State::from_app_context(AppContext {
        products: Arc::new(products),
        carts: Arc::new(carts),
        checkout: Arc::new(checkout),
    })
}

/// State whose services fail the test if any of them is called.
pub(crate) fn strict_state() -> Arc<State> {
    state(
        strict_products_mock(),
        strict_carts_mock(),
        strict_checkout_mock(),
    )
}

fn service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    service(
        state(products, strict_carts_mock(), strict_checkout_mock()),
        route,
    )
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    service(
        state(strict_products_mock(), carts, strict_checkout_mock()),
        route,
    )
}

pub(crate) fn checkout_service(checkout: MockCheckoutService, route: Router) -> Service {
    service(
        state(strict_products_mock(), strict_carts_mock(), checkout),
        route,
    )
}

pub(crate) fn make_receipt(id: i64) -> Receipt {
    Receipt {
        id: ReceiptId::from_i64(id),
        total: Decimal::new(3000, 2),
        items: vec![ReceiptLine {
            product_id: "x".to_string(),
            name: "Custom".to_string(),
            price: Decimal::from(10),
            qty: 3,
            subtotal: Decimal::new(3000, 2),
        }],
        name: Some("Ada".to_string()),
        email: None,
        created_at: Timestamp::UNIX_EPOCH,
    }
}
