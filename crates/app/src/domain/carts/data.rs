//! Cart Data

/// New Cart Entry Data
///
/// Unvalidated: the service rejects a blank product id or a quantity below one.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartEntry {
    /// Catalog id of the product to add.
    pub product_id: String,

    /// Quantity to add or merge.
    pub qty: i64,
}
