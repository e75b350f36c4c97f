//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::Sql(source) => {
            error!("failed to read product catalog: {source}");

            StatusError::internal_server_error().brief(source.to_string())
        }
    }
}
