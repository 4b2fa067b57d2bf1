//! Advisory order cache
//!
//! Read-only copy of orders previously fetched from the server, kept for
//! offline display. This cache is stale by definition and never authoritative;
//! nothing here writes back to the server.

use shared::models::Order;
use tracing::{debug, warn};

use crate::persist::LocalStore;

/// Local cache of the user's fetched orders
pub struct OrderCache {
    store: Box<dyn LocalStore>,
}

impl OrderCache {
    pub fn new(store: Box<dyn LocalStore>) -> Self {
        Self { store }
    }

    /// Replace the cached copy with freshly fetched orders
    pub fn put(&self, orders: &[Order]) {
        match serde_json::to_string(orders) {
            Ok(payload) => {
                if let Err(e) = self.store.save(&payload) {
                    warn!(error = %e, "Failed to cache orders");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize orders for caching"),
        }
    }

    /// Cached orders for display, empty when absent or unreadable
    pub fn list(&self) -> Vec<Order> {
        match self.store.load() {
            Some(payload) => serde_json::from_str(&payload).unwrap_or_else(|e| {
                debug!(error = %e, "Discarding unreadable cached orders");
                Vec::new()
            }),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::JsonFileStore;
    use shared::models::{OrderStatus, ShippingAddress};
    use tempfile::TempDir;

    fn sample_order() -> Order {
        Order {
            id: "o-1".to_string(),
            order_ref: "XT-CACHE-0001".to_string(),
            user_id: "u-1".to_string(),
            user_email: "ana@example.com".to_string(),
            items: vec![],
            subtotal: 0,
            shipping_cost: 0,
            total: 0,
            status: OrderStatus::PendingPayment,
            shipping_address: ShippingAddress {
                first_name: "Ana".to_string(),
                last_name: "Torres".to_string(),
                email: "ana@example.com".to_string(),
                phone: "+34 600 000 000".to_string(),
                address: "Calle Mayor 1".to_string(),
                city: "Madrid".to_string(),
                province: "Madrid".to_string(),
                postal_code: "28001".to_string(),
            },
            created_at: 1,
            updated_at: 1,
            paid_at: None,
            ordered_at: None,
            shipped_at: None,
            delivered_at: None,
            tracking_number: None,
            tracking_url: None,
            courier_name: None,
            supplier_order_ref: None,
            notes: None,
        }
    }

    #[test]
    fn caches_and_reloads_orders() {
        let dir = TempDir::new().unwrap();
        let cache = OrderCache::new(Box::new(JsonFileStore::new(dir.path().join("orders.json"))));

        cache.put(&[sample_order()]);
        let listed = cache.list();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].order_ref, "XT-CACHE-0001");
    }

    #[test]
    fn unreadable_cache_lists_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("orders.json");
        std::fs::write(&path, "[{broken").unwrap();

        let cache = OrderCache::new(Box::new(JsonFileStore::new(&path)));
        assert!(cache.list().is_empty());
    }
}
