//! Products Data

use rust_decimal::Decimal;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// Catalog id, unique.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unit price, never negative.
    pub price: Decimal,

    /// Short description.
    pub description: Option<String>,
}

impl NewProduct {
    fn seed(id: &str, name: &str, price: Decimal, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            price,
            description: Some(description.to_string()),
        }
    }
}

/// The catalog a fresh store starts with.
pub fn default_catalog() -> Vec<NewProduct> {
    vec![
        NewProduct::seed("p1", "Vibe Tee", Decimal::new(1999, 2), "Comfort tee"),
        NewProduct::seed("p2", "Vibe Hoodie", Decimal::new(3999, 2), "Warm hoodie"),
        NewProduct::seed("p3", "Slip-On Sneakers", Decimal::new(4999, 2), "Easy wear"),
        NewProduct::seed("p4", "Vibe Cap", Decimal::new(1250, 2), "Adjustable cap"),
        NewProduct::seed("p5", "Wireless Earbuds", Decimal::new(5999, 2), "For great sound"),
        NewProduct::seed("p6", "Water Bottle", Decimal::new(999, 2), "Stay hydrated"),
        NewProduct::seed("p7", "Socks Pack", Decimal::new(750, 2), "3 pack"),
        NewProduct::seed("p8", "Limited Sticker", Decimal::new(200, 2), "Show your vibe"),
    ]
}
