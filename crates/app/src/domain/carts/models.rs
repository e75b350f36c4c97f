//! Cart Models

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::ids::TypedId;

/// Cart Entry Id
pub type CartEntryId = TypedId<CartEntry>;

/// Cart Entry Model
#[derive(Debug, Clone, PartialEq)]
pub struct CartEntry {
    /// Row id of the entry.
    pub id: CartEntryId,

    /// Catalog id of the product in the entry.
    pub product_id: String,

    /// Quantity, always at least one.
    pub qty: u32,

    /// When the product was first added.
    pub created_at: Timestamp,
}

/// Result of adding a product to the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct AddedCartEntry {
    /// The entry after the add.
    pub entry: CartEntry,

    /// `false` when the quantity was merged into an existing entry.
    pub created: bool,
}

/// A cart entry joined with its product.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// Row id of the underlying cart entry.
    pub id: CartEntryId,

    /// Catalog id of the product.
    pub product_id: String,

    /// Product name from the catalog.
    pub name: String,

    /// Unit price from the catalog.
    pub price: Decimal,

    /// Quantity in the cart.
    pub qty: u32,

    /// `price × qty`, rounded to cents.
    pub subtotal: Decimal,
}

/// Cart Model
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    /// Priced lines in the order they were added.
    pub items: Vec<CartLine>,

    /// Sum of the rounded subtotals, rounded to cents.
    pub total: Decimal,
}

impl Cart {
    /// Whether the cart holds no priced lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
