//! Domain models
//!
//! # Contents
//!
//! - [`ProductRef`] - catalog product reference (the catalog itself is external)
//! - [`Cart`] / [`CartLine`] - client-held shopping cart
//! - [`Order`] and friends - the central order entity and its lifecycle

mod cart;
mod order;
mod product;

pub use cart::{Cart, CartLine};
pub use order::{
    GUEST_USER_ID, Order, OrderItem, OrderPatch, OrderStatus, ShippingAddress,
};
pub use product::{ProductRef, UNLIMITED_STOCK_CEILING};
