//! Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::InvalidInput(reason) => StatusError::bad_request().brief(reason),
        CartsServiceError::Pricing(source) => StatusError::bad_request().brief(source.to_string()),
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart entry not found"),
        CartsServiceError::Sql(source) => {
            error!("cart storage failure: {source}");

            StatusError::internal_server_error().brief(source.to_string())
        }
    }
}
