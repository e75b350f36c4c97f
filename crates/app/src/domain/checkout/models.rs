//! Receipt Models

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::ids::TypedId;

/// Receipt Id
pub type ReceiptId = TypedId<Receipt>;

/// Receipt Model
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    /// Row id of the receipt, strictly increasing.
    pub id: ReceiptId,

    /// Sum of the line subtotals, rounded to cents.
    pub total: Decimal,

    /// Billed lines.
    pub items: Vec<ReceiptLine>,

    /// Customer name, if one was given.
    pub name: Option<String>,

    /// Customer email, if one was given.
    pub email: Option<String>,

    /// When the receipt was issued.
    pub created_at: Timestamp,
}

/// Receipt Line Model
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine {
    /// Product id as billed.
    pub product_id: String,

    /// Product name as billed.
    pub name: String,

    /// Unit price as billed.
    pub price: Decimal,

    /// Billed quantity.
    pub qty: u32,

    /// `price × qty`, rounded to cents.
    pub subtotal: Decimal,
}
