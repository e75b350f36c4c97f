//! Carts service errors.

use sqlx::Error;
use thiserror::Error;

use crate::pricing::PricingError;

/// Carts service error variants.
#[derive(Debug, Error)]
pub enum CartsServiceError {
    /// Product id or quantity failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// Cart entry was not found.
    #[error("cart entry not found")]
    NotFound,

    /// A cart amount could not be computed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Underlying SQL/storage error.
    #[error("storage error: {0}")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::NotFound,
            error => Self::Sql(error),
        }
    }
}
