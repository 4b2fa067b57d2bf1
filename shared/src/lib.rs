//! Shared types for the XTech Components storefront
//!
//! This crate holds everything the server and the client agree on:
//!
//! - **models**: products, cart lines, orders and their invariants
//! - **request**: API request payloads
//! - **error** / **response**: unified error taxonomy and response envelope
//! - **money** / **util**: exact money formatting and time helpers

pub mod error;
pub mod models;
pub mod money;
pub mod request;
pub mod response;
pub mod util;

// Re-export common types
pub use error::{ApiError, ApiErrorCode, ApiResult};
pub use models::{
    Cart, CartLine, GUEST_USER_ID, Order, OrderItem, OrderPatch, OrderStatus, ProductRef,
    ShippingAddress,
};
pub use response::ApiResponse;
