//! Client-held shopping cart
//!
//! The cart is owned by the browsing session. Lines keep insertion order and
//! are unique by sku; derived figures are recomputed on every read, never
//! cached. Persistence lives with the client (`store-client`), not here.

use serde::{Deserialize, Serialize};

use super::order::OrderItem;
use super::product::ProductRef;

/// One cart line: a product reference plus the chosen quantity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product: ProductRef,
    pub quantity: u32,
}

impl CartLine {
    /// Line total in cents
    pub fn line_total(&self) -> i64 {
        self.product.price * i64::from(self.quantity)
    }
}

/// Ordered collection of cart lines, unique by sku
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product to the cart
    ///
    /// If the sku is already present the quantity is increased, never a second
    /// line. No stock clamp happens here; `clamped_quantity` is for the UI and
    /// checkout validation is authoritative.
    pub fn add_item(&mut self, product: ProductRef, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.sku == product.sku) {
            line.quantity += quantity;
        } else {
            self.lines.push(CartLine { product, quantity });
        }
    }

    /// Set the quantity for a sku
    ///
    /// A quantity of zero removes the line. Unknown skus are a no-op.
    pub fn update_quantity(&mut self, sku: &str, quantity: u32) {
        if quantity == 0 {
            self.remove_item(sku);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.sku == sku) {
            line.quantity = quantity;
        }
    }

    /// Remove a line by sku
    pub fn remove_item(&mut self, sku: &str) {
        self.lines.retain(|l| l.product.sku != sku);
    }

    /// Remove all lines
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    // ========== Queries ==========

    pub fn is_in_cart(&self, sku: &str) -> bool {
        self.lines.iter().any(|l| l.product.sku == sku)
    }

    /// Quantity for a sku, 0 when absent
    pub fn item_quantity(&self, sku: &str) -> u32 {
        self.lines
            .iter()
            .find(|l| l.product.sku == sku)
            .map_or(0, |l| l.quantity)
    }

    /// Total number of units across all lines (recomputed on every call)
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of line totals in cents (recomputed on every call)
    pub fn subtotal(&self) -> i64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines in insertion order
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Clamp a requested quantity to the line's known stock ceiling
    ///
    /// Unknown skus pass the request through unchanged.
    pub fn clamped_quantity(&self, sku: &str, requested: u32) -> u32 {
        self.lines
            .iter()
            .find(|l| l.product.sku == sku)
            .map_or(requested, |l| requested.min(l.product.max_quantity()))
    }

    /// Freeze the cart into immutable order items
    ///
    /// This is the checkout serialization point: the snapshot keeps the price
    /// at purchase time regardless of later catalog changes.
    pub fn snapshot_items(&self) -> Vec<OrderItem> {
        self.lines
            .iter()
            .map(|l| OrderItem {
                product_id: l.product.id.clone(),
                sku: l.product.sku.clone(),
                name: l.product.name.clone(),
                brand: l.product.brand.clone(),
                price: l.product.price,
                quantity: l.quantity,
                image: l.product.primary_image().map(str::to_string),
            })
            .collect()
    }
}
