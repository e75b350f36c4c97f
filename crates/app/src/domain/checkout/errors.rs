//! Checkout service errors.

use sqlx::Error;
use thiserror::Error;

use crate::pricing::PricingError;

/// Checkout service error variants.
#[derive(Debug, Error)]
pub enum CheckoutServiceError {
    /// An explicit checkout item failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// Nothing to bill: no explicit items and an empty live cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Receipt was not found.
    #[error("receipt not found")]
    NotFound,

    /// A receipt amount could not be computed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Underlying SQL/storage error.
    #[error("storage error: {0}")]
    Sql(#[source] Error),
}

impl From<Error> for CheckoutServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::NotFound,
            error => Self::Sql(error),
        }
    }
}
