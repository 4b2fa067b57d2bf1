//! Order entity and lifecycle types
//!
//! Orders are created from a frozen cart snapshot and then only move through
//! status/tracking mutations. Items, address, totals and `created_at` never
//! change after creation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Sentinel user id for unauthenticated checkout
pub const GUEST_USER_ID: &str = "guest";

/// Order status progression
///
/// `pending_payment → payment_received → ordered → shipped → delivered`.
/// Staff set statuses manually, so jumps are accepted; the set-once entry
/// stamps are what the system actually enforces.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    PendingPayment,
    PaymentReceived,
    Ordered,
    Shipped,
    Delivered,
}

impl OrderStatus {
    /// Wire representation, e.g. `payment_received`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingPayment => "pending_payment",
            Self::PaymentReceived => "payment_received",
            Self::Ordered => "ordered",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
        }
    }

    /// Human label for emails and invoices
    pub fn label(&self) -> &'static str {
        match self {
            Self::PendingPayment => "Pending payment",
            Self::PaymentReceived => "Payment received",
            Self::Ordered => "Ordered from supplier",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Order line captured from the cart at checkout time
///
/// Immutable once created: the price-at-purchase guarantee.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub sku: String,
    pub name: String,
    pub brand: String,
    /// Unit price in cents at purchase time
    pub price: i64,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl OrderItem {
    /// Line total in cents
    pub fn line_total(&self) -> i64 {
        self.price * i64::from(self.quantity)
    }
}

/// Shipping address, all fields required for order creation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    #[validate(length(min = 1, max = 100, message = "firstName must not be empty"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "lastName must not be empty"))]
    pub last_name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, max = 100, message = "phone must not be empty"))]
    pub phone: String,
    #[validate(length(min = 1, max = 500, message = "address must not be empty"))]
    pub address: String,
    #[validate(length(min = 1, max = 100, message = "city must not be empty"))]
    pub city: String,
    #[validate(length(min = 1, max = 100, message = "province must not be empty"))]
    pub province: String,
    #[validate(length(min = 1, max = 20, message = "postalCode must not be empty"))]
    pub postal_code: String,
}

impl ShippingAddress {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The central order entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Internal identifier, never shown to customers as the primary reference
    pub id: String,
    /// Public, human-shareable reference; immutable and unique
    pub order_ref: String,
    /// Owner identifier, or `"guest"`
    pub user_id: String,
    pub user_email: String,
    pub items: Vec<OrderItem>,
    /// Sum of line totals in cents, frozen at creation
    pub subtotal: i64,
    pub shipping_cost: i64,
    /// `subtotal + shipping_cost`, frozen at creation
    pub total: i64,
    pub status: OrderStatus,
    pub shipping_address: ShippingAddress,
    /// Set once at creation, never changes
    pub created_at: i64,
    /// Bumped on every write
    pub updated_at: i64,

    // Status-entry stamps, each set exactly once on first entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordered_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipped_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<i64>,

    // Fulfillment metadata, independently updatable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courier_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_order_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Order {
    /// Sum of line totals recomputed from the stored items
    pub fn computed_subtotal(&self) -> i64 {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    /// Recomputed grand total
    pub fn computed_total(&self) -> i64 {
        self.computed_subtotal() + self.shipping_cost
    }

    /// Consistency check: stored totals must match the recomputed sums
    pub fn totals_consistent(&self) -> bool {
        self.subtotal == self.computed_subtotal() && self.total == self.subtotal + self.shipping_cost
    }

    /// When the order first entered the given status, if it has
    pub fn status_entered_at(&self, status: OrderStatus) -> Option<i64> {
        match status {
            OrderStatus::PendingPayment => Some(self.created_at),
            OrderStatus::PaymentReceived => self.paid_at,
            OrderStatus::Ordered => self.ordered_at,
            OrderStatus::Shipped => self.shipped_at,
            OrderStatus::Delivered => self.delivered_at,
        }
    }

    /// Apply a merge-patch to the mutable surface of the order
    ///
    /// Only fields present in the patch are touched. A status write stamps the
    /// matching entry timestamp only if it is still unset, so re-applying the
    /// same status never resets it. `updated_at` is bumped unconditionally.
    pub fn apply(&mut self, patch: &OrderPatch, now: i64) {
        if let Some(status) = patch.status {
            self.status = status;
            let stamp = match status {
                OrderStatus::PendingPayment => None,
                OrderStatus::PaymentReceived => Some(&mut self.paid_at),
                OrderStatus::Ordered => Some(&mut self.ordered_at),
                OrderStatus::Shipped => Some(&mut self.shipped_at),
                OrderStatus::Delivered => Some(&mut self.delivered_at),
            };
            if let Some(slot) = stamp
                && slot.is_none()
            {
                *slot = Some(now);
            }
        }
        if let Some(v) = &patch.tracking_number {
            self.tracking_number = Some(v.clone());
        }
        if let Some(v) = &patch.tracking_url {
            self.tracking_url = Some(v.clone());
        }
        if let Some(v) = &patch.courier_name {
            self.courier_name = Some(v.clone());
        }
        if let Some(v) = &patch.supplier_order_ref {
            self.supplier_order_ref = Some(v.clone());
        }
        // Notes are clearable: an explicit empty string removes them, which is
        // distinct from the field being absent from the patch.
        if let Some(notes) = &patch.notes {
            self.notes = if notes.is_empty() {
                None
            } else {
                Some(notes.clone())
            };
        }
        self.updated_at = now;
    }
}

/// Merge-patch for the mutable order fields
///
/// Absent fields leave the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courier_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_order_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl OrderPatch {
    /// True when the patch would not change anything
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.tracking_number.is_none()
            && self.tracking_url.is_none()
            && self.courier_name.is_none()
            && self.supplier_order_ref.is_none()
            && self.notes.is_none()
    }
}
