//! Products service errors.

use sqlx::Error;
use thiserror::Error;

/// Products service error variants.
#[derive(Debug, Error)]
pub enum ProductsServiceError {
    /// Underlying SQL/storage error.
    #[error("storage error: {0}")]
    Sql(#[from] Error),
}
