//! Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::checkout::CheckoutServiceError;

pub(crate) fn into_status_error(error: CheckoutServiceError) -> StatusError {
    match error {
        CheckoutServiceError::InvalidInput(reason) => StatusError::bad_request().brief(reason),
        CheckoutServiceError::EmptyCart => StatusError::bad_request().brief("Cart is empty"),
        CheckoutServiceError::Pricing(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        CheckoutServiceError::NotFound => StatusError::not_found().brief("Receipt not found"),
        CheckoutServiceError::Sql(source) => {
            error!("checkout storage failure: {source}");

            StatusError::internal_server_error().brief(source.to_string())
        }
    }
}
