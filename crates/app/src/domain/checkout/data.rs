//! Checkout Data

use rust_decimal::Decimal;

/// An ad-hoc line supplied by the caller instead of the live cart.
///
/// Unvalidated: the service rejects a blank product id, a negative price or a
/// quantity below one.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutItem {
    /// Product id to print on the receipt.
    pub product_id: String,

    /// Product name to print on the receipt.
    pub name: String,

    /// Unit price.
    pub price: Decimal,

    /// Quantity to bill.
    pub qty: i64,
}

/// New Checkout Data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCheckout {
    /// Lines to bill instead of the live cart; `None` or empty uses the cart.
    pub items: Option<Vec<CheckoutItem>>,

    /// Customer name; blank is stored as absent.
    pub name: Option<String>,

    /// Customer email; blank is stored as absent.
    pub email: Option<String>,
}
