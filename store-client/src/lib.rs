//! Client-side state for the XTech Components storefront
//!
//! The browsing session owns its cart: every mutation is synchronously
//! persisted to the client's durable local store, and corrupt or legacy data
//! loads as an empty cart instead of crashing the app. Orders fetched from
//! the server may be cached here for offline display, but that copy is
//! advisory only — the server is always authoritative.

pub mod cart;
pub mod order_cache;
pub mod persist;

pub use cart::CartStore;
pub use order_cache::OrderCache;
pub use persist::{JsonFileStore, LocalStore};
