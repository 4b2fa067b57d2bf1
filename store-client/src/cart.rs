//! Persistent cart store
//!
//! Wraps the shared [`Cart`] with durable local persistence. Every mutating
//! call writes the full cart back to the store before returning; a corrupt or
//! legacy payload on load falls back to an empty cart.

use shared::models::{Cart, ProductRef};
use tracing::{debug, warn};

use crate::persist::LocalStore;

/// Client-held cart with synchronous persistence
pub struct CartStore {
    cart: Cart,
    store: Box<dyn LocalStore>,
}

impl CartStore {
    /// Open the cart from the given store
    ///
    /// Any parse failure yields an empty cart; bad persisted data must never
    /// crash the app.
    pub fn open(store: Box<dyn LocalStore>) -> Self {
        let cart = match store.load() {
            Some(payload) => serde_json::from_str(&payload).unwrap_or_else(|e| {
                debug!(error = %e, "Discarding unreadable persisted cart");
                Cart::new()
            }),
            None => Cart::new(),
        };
        Self { cart, store }
    }

    // ========== Mutations (each persists synchronously) ==========

    /// Add a product; merges quantity when the sku is already present
    pub fn add_item(&mut self, product: ProductRef, quantity: u32) {
        self.cart.add_item(product, quantity);
        self.flush();
    }

    /// Set a line's quantity; zero removes the line, unknown skus are a no-op
    ///
    /// The store accepts the value as given. UIs should pass something already
    /// clamped via [`clamped_quantity`](Self::clamped_quantity); checkout
    /// validation on the server stays authoritative either way.
    pub fn update_quantity(&mut self, sku: &str, quantity: u32) {
        self.cart.update_quantity(sku, quantity);
        self.flush();
    }

    pub fn remove_item(&mut self, sku: &str) {
        self.cart.remove_item(sku);
        self.flush();
    }

    pub fn clear(&mut self) {
        self.cart.clear();
        self.flush();
    }

    // ========== Queries ==========

    pub fn is_in_cart(&self, sku: &str) -> bool {
        self.cart.is_in_cart(sku)
    }

    pub fn item_quantity(&self, sku: &str) -> u32 {
        self.cart.item_quantity(sku)
    }

    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    pub fn subtotal(&self) -> i64 {
        self.cart.subtotal()
    }

    pub fn clamped_quantity(&self, sku: &str, requested: u32) -> u32 {
        self.cart.clamped_quantity(sku, requested)
    }

    /// The underlying cart, e.g. for snapshotting at checkout
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Persist the current cart
    ///
    /// Persistence failures are logged and swallowed: the in-memory cart stays
    /// usable and the next successful write catches up.
    fn flush(&self) {
        match serde_json::to_string(&self.cart) {
            Ok(payload) => {
                if let Err(e) = self.store.save(&payload) {
                    warn!(error = %e, "Failed to persist cart");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize cart"),
        }
    }
}
