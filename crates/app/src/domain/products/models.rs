//! Product Models

use rust_decimal::Decimal;

/// Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Catalog id, unique.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unit price, never negative.
    pub price: Decimal,

    /// Short description.
    pub description: Option<String>,
}
