//! Order API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use shared::models::Order;
use shared::request::{CreateOrderRequest, OrderCreated, UpdateOrderRequest};
use shared::{ApiError, ApiResponse, ApiResult};

use crate::core::ServerState;
use crate::orders::ServiceError;
use crate::utils::validation::{MAX_EMAIL_LEN, MAX_ID_LEN, validate_required_text};

fn map_service_err(e: ServiceError) -> ApiError {
    match e {
        ServiceError::Validation(message) => ApiError::validation(message),
        ServiceError::NotFound => ApiError::not_found("Order"),
        ServiceError::Storage(err) => ApiError::database(err.to_string()),
    }
}

/// Create an order from a checkout payload
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateOrderRequest>,
) -> ApiResult<Json<ApiResponse<OrderCreated>>> {
    let order_data = payload
        .order_data
        .ok_or_else(|| ApiError::validation("orderData is required"))?;
    let user_id = payload
        .user_id
        .ok_or_else(|| ApiError::validation("userId is required"))?;
    let user_email = payload
        .user_email
        .ok_or_else(|| ApiError::validation("userEmail is required"))?;
    validate_required_text(&user_id, "userId", MAX_ID_LEN)?;
    validate_required_text(&user_email, "userEmail", MAX_EMAIL_LEN)?;

    let order = state
        .orders
        .create(order_data, user_id, user_email)
        .await
        .map_err(map_service_err)?;

    Ok(Json(ApiResponse::ok(OrderCreated {
        id: order.id.clone(),
        order_ref: order.order_ref.clone(),
        total: order.total,
        status: order.status,
    })))
}

/// Query params for retrieval: one of the two must be present
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveQuery {
    pub order_ref: Option<String>,
    pub user_id: Option<String>,
}

/// Either one order (by reference) or a list (by user)
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RetrievePayload {
    One(Box<Order>),
    Many(Vec<Order>),
}

/// Retrieve by public reference or list by user, newest first
pub async fn retrieve(
    State(state): State<ServerState>,
    Query(query): Query<RetrieveQuery>,
) -> ApiResult<Json<ApiResponse<RetrievePayload>>> {
    if let Some(order_ref) = query.order_ref.filter(|r| !r.trim().is_empty()) {
        let order = state
            .orders
            .find_by_ref(&order_ref)
            .map_err(map_service_err)?
            .ok_or_else(|| ApiError::not_found(format!("Order {order_ref}")))?;
        return Ok(Json(ApiResponse::ok(RetrievePayload::One(Box::new(order)))));
    }

    if let Some(user_id) = query.user_id.filter(|u| !u.trim().is_empty()) {
        let orders = state.orders.list_by_user(&user_id).map_err(map_service_err)?;
        return Ok(Json(ApiResponse::ok(RetrievePayload::Many(orders))));
    }

    Err(ApiError::validation("orderRef or userId is required"))
}

/// Merge-patch status and tracking fields
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<UpdateOrderRequest>,
) -> ApiResult<Json<ApiResponse<Order>>> {
    let order_id = payload
        .order_id
        .ok_or_else(|| ApiError::validation("orderId is required"))?;
    let user_id = payload
        .user_id
        .ok_or_else(|| ApiError::validation("userId is required"))?;
    validate_required_text(&order_id, "orderId", MAX_ID_LEN)?;
    validate_required_text(&user_id, "userId", MAX_ID_LEN)?;

    let order = state
        .orders
        .update_status(&user_id, &order_id, &payload.patch)
        .map_err(map_service_err)?;

    Ok(Json(ApiResponse::ok(order)))
}

/// Download the invoice for an order as plain text
pub async fn invoice(
    State(state): State<ServerState>,
    Path(order_ref): Path<String>,
) -> ApiResult<Response> {
    let order = state
        .orders
        .find_by_ref(&order_ref)
        .map_err(map_service_err)?
        .ok_or_else(|| ApiError::not_found(format!("Order {order_ref}")))?;

    let document = state.orders.render_invoice(&order);
    let headers = [
        (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}.txt\"", order.order_ref),
        ),
    ];
    Ok((headers, document.to_text()).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use shared::models::{OrderItem, OrderStatus, ShippingAddress};
    use shared::request::OrderData;
    use tempfile::TempDir;

    fn test_state(dir: &TempDir) -> ServerState {
        let mut config = Config::from_env();
        config.work_dir = dir.path().to_string_lossy().into_owned();
        config.smtp = None;
        ServerState::initialize(config).unwrap()
    }

    fn checkout_payload() -> CreateOrderRequest {
        CreateOrderRequest {
            order_data: Some(OrderData {
                items: vec![OrderItem {
                    product_id: "p-a".to_string(),
                    sku: "A".to_string(),
                    name: "GPU".to_string(),
                    brand: "Acme".to_string(),
                    price: 1000,
                    quantity: 2,
                    image: None,
                }],
                subtotal: 2000,
                shipping_cost: 0,
                total: 2000,
                shipping_address: ShippingAddress {
                    first_name: "Ana".to_string(),
                    last_name: "Torres".to_string(),
                    email: "ana@example.com".to_string(),
                    phone: "+34 600 000 000".to_string(),
                    address: "Calle Mayor 1".to_string(),
                    city: "Madrid".to_string(),
                    province: "Madrid".to_string(),
                    postal_code: "28001".to_string(),
                },
            }),
            user_id: Some("u-1".to_string()),
            user_email: Some("ana@example.com".to_string()),
        }
    }

    #[tokio::test]
    async fn create_rejects_missing_members() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);

        let mut payload = checkout_payload();
        payload.order_data = None;
        let err = create(State(state.clone()), Json(payload)).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));

        let mut payload = checkout_payload();
        payload.user_id = None;
        let err = create(State(state.clone()), Json(payload)).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));

        let mut payload = checkout_payload();
        payload.user_email = None;
        let err = create(State(state), Json(payload)).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
    }

    #[tokio::test]
    async fn create_then_retrieve_round_trips() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);

        let created = create(State(state.clone()), Json(checkout_payload()))
            .await
            .unwrap();
        let created = created.0.data.unwrap();
        assert_eq!(created.status, OrderStatus::PendingPayment);
        assert_eq!(created.total, 2000);

        let response = retrieve(
            State(state),
            Query(RetrieveQuery {
                order_ref: Some(created.order_ref.clone()),
                user_id: None,
            }),
        )
        .await
        .unwrap();
        match response.0.data.unwrap() {
            RetrievePayload::One(order) => assert_eq!(order.order_ref, created.order_ref),
            RetrievePayload::Many(_) => panic!("expected a single order"),
        }
    }

    #[tokio::test]
    async fn retrieve_requires_a_parameter() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);

        let err = retrieve(
            State(state),
            Query(RetrieveQuery { order_ref: None, user_id: None }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
    }

    #[tokio::test]
    async fn retrieve_unknown_reference_is_not_found() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);

        let err = retrieve(
            State(state),
            Query(RetrieveQuery {
                order_ref: Some("XT-NEVER-0000".to_string()),
                user_id: None,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
    }
}
