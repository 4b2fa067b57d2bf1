//! API request and response payloads
//!
//! Client-facing JSON is camelCase. The create/update payloads keep their
//! required members optional at the serde layer so the server can reject
//! missing input with a typed validation error instead of a decode failure.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{OrderItem, OrderPatch, OrderStatus, ShippingAddress};

/// Body of `POST /api/orders`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub order_data: Option<OrderData>,
    pub user_id: Option<String>,
    pub user_email: Option<String>,
}

/// Frozen checkout payload: the cart snapshot plus totals and address
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderData {
    pub items: Vec<OrderItem>,
    /// Cents
    pub subtotal: i64,
    /// Cents
    pub shipping_cost: i64,
    /// Cents, `subtotal + shipping_cost`
    pub total: i64,
    pub shipping_address: ShippingAddress,
}

/// Success payload of `POST /api/orders`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreated {
    pub id: String,
    pub order_ref: String,
    pub total: i64,
    pub status: OrderStatus,
}

/// Body of `PATCH /api/orders`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    pub order_id: Option<String>,
    pub user_id: Option<String>,
    #[serde(flatten)]
    pub patch: OrderPatch,
}

/// Body of `POST /api/quotes`
///
/// Free-text build request handled outside the order core but sharing the
/// notifier.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[validate(length(min = 1, max = 100, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Free-text component description
    #[validate(length(min = 1, max = 4000, message = "details must not be empty"))]
    pub details: String,
}

/// Success payload of `POST /api/quotes`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteReceived {
    pub quote_ref: String,
}
