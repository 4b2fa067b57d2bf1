//! Health check endpoint

use axum::{Json, Router, routing::get};
use serde::Serialize;

use shared::ApiResponse;

use crate::core::ServerState;

/// Health router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

async fn health() -> Json<ApiResponse<HealthStatus>> {
    Json(ApiResponse::ok(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }))
}
