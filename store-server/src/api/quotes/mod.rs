//! Quote request API module
//!
//! Companion to the order core: free-text build requests sharing the
//! notifier, rate-limited per client address.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Quote router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/quotes", post(handler::create))
}
