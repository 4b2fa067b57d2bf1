//! HTTP server assembly

use std::net::SocketAddr;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::state::ServerState;
use crate::api;

/// The storefront HTTP server
pub struct Server {
    state: ServerState,
}

impl Server {
    pub fn with_state(state: ServerState) -> Self {
        Self { state }
    }

    /// Assemble the full router with middleware layers
    pub fn router(state: ServerState) -> Router {
        Router::new()
            .merge(api::health::router())
            .merge(api::orders::router())
            .merge(api::quotes::router())
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    /// Bind and serve until shutdown
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.state.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(%addr, "HTTP server listening");

        axum::serve(
            listener,
            Self::router(self.state).into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await?;
        Ok(())
    }
}
