//! Catalog product reference

use serde::{Deserialize, Serialize};

/// Quantity ceiling applied when a product's stock is unknown or unlimited
pub const UNLIMITED_STOCK_CEILING: u32 = 999;

/// Reference to a catalog product as the storefront sees it
///
/// The catalog is an external collaborator; only these reference records ever
/// cross into the cart and order paths. Prices are integer cents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductRef {
    /// Catalog identifier
    pub id: String,
    /// Stock keeping unit (unique)
    pub sku: String,
    pub name: String,
    pub brand: String,
    /// Unit price in cents
    pub price: i64,
    /// Pre-discount price in cents, kept for strike-through display
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<i64>,
    /// Known stock on hand (`None` = unknown/unlimited)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<u32>,
    /// Ordered image URLs, first one is primary
    #[serde(default)]
    pub images: Vec<String>,
}

impl ProductRef {
    /// Maximum quantity a single cart line for this product may hold
    pub fn max_quantity(&self) -> u32 {
        self.stock_quantity.unwrap_or(UNLIMITED_STOCK_CEILING)
    }

    /// Primary product image, if any
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
