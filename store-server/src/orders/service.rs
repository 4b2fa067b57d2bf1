//! Order service
//!
//! Orchestrates the order lifecycle: creation from a frozen checkout payload,
//! staff-driven status progression, and the two lookup paths. Collaborators
//! (repository, notifier, invoice renderer) are injected once at construction
//! — no hidden singletons.
//!
//! # Creation flow
//!
//! ```text
//! create(order_data, user_id, user_email)
//!     ├─ 1. Validate inputs (reject synchronously)
//!     ├─ 2. Build order: id, reference, timestamps, pending_payment
//!     ├─ 3. Persist — authoritative, fatal on failure
//!     ├─ 4. Render invoice        (best-effort, logged, swallowed)
//!     ├─ 5. Customer confirmation (best-effort, logged, swallowed)
//!     ├─ 6. Admin alert           (best-effort, logged, swallowed)
//!     └─ 7. Return the persisted order
//! ```

use thiserror::Error;
use tracing::{debug, info, warn};

use shared::models::{Order, OrderPatch, OrderStatus};
use shared::request::OrderData;
use shared::util::now_millis;

use crate::invoice::InvoiceRenderer;
use crate::notify::Notifier;
use crate::orders::reference;
use crate::orders::storage::{OrderStore, StorageError};
use crate::utils::validation::validate_payload;

/// Order service errors
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("Order not found")]
    NotFound,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Order lifecycle orchestration
pub struct OrderService {
    store: OrderStore,
    notifier: Notifier,
    invoices: InvoiceRenderer,
}

impl OrderService {
    pub fn new(store: OrderStore, notifier: Notifier, invoices: InvoiceRenderer) -> Self {
        Self {
            store,
            notifier,
            invoices,
        }
    }

    /// Create an order from a frozen checkout payload
    ///
    /// Persistence must succeed; everything after it is fire-and-forget. A
    /// failed invoice render or notification never fails the creation — the
    /// caller gets the persisted order back regardless.
    pub async fn create(
        &self,
        order_data: OrderData,
        user_id: String,
        user_email: String,
    ) -> ServiceResult<Order> {
        if user_id.trim().is_empty() {
            return Err(ServiceError::Validation("userId must not be empty".into()));
        }
        if user_email.trim().is_empty() {
            return Err(ServiceError::Validation(
                "userEmail must not be empty".into(),
            ));
        }
        if order_data.items.is_empty() {
            return Err(ServiceError::Validation(
                "order must contain at least one item".into(),
            ));
        }
        if order_data.items.iter().any(|i| i.quantity == 0) {
            return Err(ServiceError::Validation(
                "item quantities must be at least 1".into(),
            ));
        }
        validate_payload(&order_data.shipping_address)
            .map_err(|e| ServiceError::Validation(e.message()))?;

        let now = now_millis();
        let order = Order {
            id: uuid::Uuid::new_v4().to_string(),
            order_ref: reference::order_ref(),
            user_id,
            user_email,
            items: order_data.items,
            subtotal: order_data.subtotal,
            shipping_cost: order_data.shipping_cost,
            total: order_data.total,
            status: OrderStatus::PendingPayment,
            shipping_address: order_data.shipping_address,
            created_at: now,
            updated_at: now,
            paid_at: None,
            ordered_at: None,
            shipped_at: None,
            delivered_at: None,
            tracking_number: None,
            tracking_url: None,
            courier_name: None,
            supplier_order_ref: None,
            notes: None,
        };

        // Persistence is authoritative and must complete before any side
        // effect is attempted.
        self.store.put(&order)?;
        info!(
            order_ref = %order.order_ref,
            user_id = %order.user_id,
            total = order.total,
            "Order created"
        );

        // Invoice attachment for the confirmation mail: generated, not yet
        // attached anywhere.
        let invoice = self.invoices.render(&order, now);
        debug!(
            order_ref = %order.order_ref,
            attachment_bytes = invoice.to_base64().len(),
            "Invoice rendered"
        );

        let confirmation = self.notifier.order_confirmation(&order).await;
        if !confirmation.success {
            warn!(order_ref = %order.order_ref, "Customer confirmation failed, order unaffected");
        }
        let alert = self.notifier.admin_order_alert(&order).await;
        if !alert.success {
            warn!(order_ref = %order.order_ref, "Admin alert failed, order unaffected");
        }

        Ok(order)
    }

    /// Merge-patch the mutable surface of an order
    ///
    /// Accepts any status from the allowed set at any time (statuses are set
    /// manually by staff); set-once entry stamps are handled by the patch
    /// application itself.
    pub fn update_status(
        &self,
        user_id: &str,
        order_id: &str,
        patch: &OrderPatch,
    ) -> ServiceResult<Order> {
        let updated = self
            .store
            .update(user_id, order_id, patch)?
            .ok_or(ServiceError::NotFound)?;

        info!(
            order_ref = %updated.order_ref,
            status = %updated.status,
            "Order updated"
        );
        Ok(updated)
    }

    /// Look up one order by its public reference
    pub fn find_by_ref(&self, order_ref: &str) -> ServiceResult<Option<Order>> {
        let found = self.store.query_by_ref(order_ref)?;
        if let Some(order) = &found {
            Self::verify_totals(order);
        }
        Ok(found)
    }

    /// All orders for a user, newest first
    pub fn list_by_user(&self, user_id: &str) -> ServiceResult<Vec<Order>> {
        let orders = self.store.query_by_user(user_id)?;
        for order in &orders {
            Self::verify_totals(order);
        }
        Ok(orders)
    }

    /// Render the invoice for an order (download path)
    pub fn render_invoice(&self, order: &Order) -> crate::invoice::InvoiceDocument {
        self.invoices.render(order, now_millis())
    }

    /// Consistency check on read: stored totals must match the recomputed
    /// sums. A mismatch is logged loudly; the record is still served.
    fn verify_totals(order: &Order) {
        if !order.totals_consistent() {
            tracing::error!(
                order_ref = %order.order_ref,
                stored_subtotal = order.subtotal,
                computed_subtotal = order.computed_subtotal(),
                stored_total = order.total,
                "Stored totals disagree with recomputed sums"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{BankDetails, StoreInfo};
    use shared::models::{OrderItem, ShippingAddress};

    fn service() -> OrderService {
        OrderService::new(
            OrderStore::open_in_memory().unwrap(),
            Notifier::simulated(),
            InvoiceRenderer::new(StoreInfo::default(), BankDetails::default()),
        )
    }

    fn order_data() -> OrderData {
        OrderData {
            items: vec![OrderItem {
                product_id: "p-a".to_string(),
                sku: "A".to_string(),
                name: "GPU".to_string(),
                brand: "Acme".to_string(),
                price: 1000,
                quantity: 2,
                image: None,
            }],
            subtotal: 2000,
            shipping_cost: 500,
            total: 2500,
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
        }
    }

    #[tokio::test]
    async fn create_assigns_identity_and_initial_state() {
        let svc = service();
        let order = svc
            .create(order_data(), "u-1".to_string(), "ana@example.com".to_string())
            .await
            .unwrap();

        assert!(order.order_ref.starts_with("XT-"));
        assert!(!order.id.is_empty());
        assert_eq!(order.status, OrderStatus::PendingPayment);
        assert_eq!(order.created_at, order.updated_at);
        assert_eq!(order.paid_at, None);

        // Retrievable through both lookup paths
        let by_ref = svc.find_by_ref(&order.order_ref).unwrap().unwrap();
        assert_eq!(by_ref.id, order.id);
        assert_eq!(svc.list_by_user("u-1").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_rejects_missing_inputs() {
        let svc = service();

        let err = svc
            .create(order_data(), "  ".to_string(), "ana@example.com".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let mut empty_items = order_data();
        empty_items.items.clear();
        let err = svc
            .create(empty_items, "u-1".to_string(), "ana@example.com".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn update_of_unknown_order_is_not_found() {
        let svc = service();
        let err = svc
            .update_status("u-1", "missing", &OrderPatch::default())
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound));
    }

    #[tokio::test]
    async fn two_creations_never_share_a_reference() {
        let svc = service();
        let a = svc
            .create(order_data(), "u-1".to_string(), "ana@example.com".to_string())
            .await
            .unwrap();
        let b = svc
            .create(order_data(), "u-1".to_string(), "ana@example.com".to_string())
            .await
            .unwrap();
        assert_ne!(a.order_ref, b.order_ref);
    }
}
