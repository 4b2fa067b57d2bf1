//! Order API module

mod handler;

use axum::{
    Router,
    routing::get,
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new()
        // Create / retrieve / update on the collection root
        .route(
            "/api/orders",
            get(handler::retrieve)
                .post(handler::create)
                .patch(handler::update),
        )
        // Invoice download by public reference
        .route("/api/orders/{order_ref}/invoice", get(handler::invoice))
}
