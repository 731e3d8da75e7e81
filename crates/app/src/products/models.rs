//! Product Models

use jiff::Timestamp;
use vitrine::Amount;

use crate::uuids::TypedUuid;

pub type ProductUuid = TypedUuid<Product>;

/// Product Model
///
/// `original_price`, `discount_percent`, and `rating` are display
/// metadata. Pricing math only ever reads `price`.
#[derive(Debug, Clone)]
pub struct Product {
    pub uuid: ProductUuid,
    pub title: String,
    pub description: Option<String>,
    /// Unit price in minor units.
    pub price: Amount,
    /// Struck-through list price in minor units, when on sale.
    pub original_price: Option<Amount>,
    pub discount_percent: Option<i32>,
    pub rating: Option<f64>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub created_at: Timestamp,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub title: String,
    pub description: Option<String>,
    pub price: Amount,
    pub original_price: Option<Amount>,
    pub discount_percent: Option<i32>,
    pub rating: Option<f64>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
}
