//! Quote request handler

use std::net::SocketAddr;

use axum::{
    Json,
    extract::{ConnectInfo, State},
    http::HeaderMap,
};
use tracing::info;

use shared::request::{QuoteReceived, QuoteRequest};
use shared::{ApiError, ApiResponse, ApiResult};

use crate::core::ServerState;
use crate::orders::reference;
use crate::utils::rate_limit::client_ip;
use crate::utils::validation::validate_payload;

/// Accept a quote request and notify both sides
///
/// Notifications are fire-and-forget: the request succeeds as soon as it is
/// validated and assigned a reference.
pub async fn create(
    State(state): State<ServerState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(payload): Json<QuoteRequest>,
) -> ApiResult<Json<ApiResponse<QuoteReceived>>> {
    let ip = client_ip(&headers, peer);
    if !state.quote_limiter.check(ip) {
        return Err(ApiError::RateLimited);
    }

    validate_payload(&payload)?;

    let quote_ref = reference::quote_ref();
    info!(quote_ref = %quote_ref, from = %payload.email, "Quote request received");

    state.notifier.quote_confirmation(&payload, &quote_ref).await;
    state.notifier.quote_admin_alert(&payload, &quote_ref).await;

    Ok(Json(ApiResponse::ok(QuoteReceived { quote_ref })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use tempfile::TempDir;

    fn test_state(dir: &TempDir, quote_rate: u32) -> ServerState {
        let mut config = Config::from_env();
        config.work_dir = dir.path().to_string_lossy().into_owned();
        config.smtp = None;
        config.quote_rate_per_minute = quote_rate;
        ServerState::initialize(config).unwrap()
    }

    fn quote() -> QuoteRequest {
        QuoteRequest {
            name: "Leo".to_string(),
            email: "leo@example.com".to_string(),
            phone: None,
            details: "Quiet build, 64GB RAM".to_string(),
        }
    }

    fn peer() -> ConnectInfo<SocketAddr> {
        ConnectInfo("198.51.100.4:55555".parse().unwrap())
    }

    #[tokio::test]
    async fn quote_request_gets_a_reference() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, 10);

        let response = create(State(state), peer(), HeaderMap::new(), Json(quote()))
            .await
            .unwrap();
        let received = response.0.data.unwrap();
        assert!(received.quote_ref.starts_with("XTQ-"));
    }

    #[tokio::test]
    async fn repeated_requests_from_one_address_are_limited() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, 2);

        for _ in 0..2 {
            create(State(state.clone()), peer(), HeaderMap::new(), Json(quote()))
                .await
                .unwrap();
        }
        let err = create(State(state), peer(), HeaderMap::new(), Json(quote()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::RateLimited));
    }

    #[tokio::test]
    async fn invalid_payload_is_rejected() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, 10);

        let mut bad = quote();
        bad.email = "not-an-email".to_string();
        let err = create(State(state), peer(), HeaderMap::new(), Json(bad))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
    }
}
