//! Purchase order handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};

use super::{parse_decimal, parse_fuel, parse_status, parse_vehicle};
use crate::api::dto::{
    CreateOrderRequest, OrderListParams, OrderListResponse, OrderResponse, PaginationParams,
    UpdateStatusRequest,
};
use crate::app_state::AppState;
use crate::domain::OrderId;
use crate::error::{ApiError, ErrorResponse};
use crate::service::order_service::{OrderFilter, OrderInput};

/// `POST /orders` — Place a purchase order.
///
/// # Errors
///
/// Returns [`ApiError`] on invalid input or unknown references.
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    tag = "Orders",
    summary = "Place a purchase order",
    description = "Registers an order in draft status with the negotiated product and freight prices.",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = OrderResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Station or supplier not found", body = ErrorResponse),
    )
)]
pub async fn create_order(
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = OrderInput {
        station_id: req.station_id,
        supplier_id: req.supplier_id,
        fuel: parse_fuel(&req.fuel)?,
        vehicle: parse_vehicle(&req.vehicle)?,
        volume_liters: parse_decimal("volume_liters", &req.volume_liters)?,
        product_price_per_liter: parse_decimal(
            "product_price_per_liter",
            &req.product_price_per_liter,
        )?,
        freight_cost_per_liter: parse_decimal(
            "freight_cost_per_liter",
            &req.freight_cost_per_liter,
        )?,
        order_date: req.order_date,
    };
    let order = state.orders.create_order(input).await?;
    Ok((StatusCode::CREATED, Json(OrderResponse::from(order))))
}

/// `GET /orders` — List orders in a date range.
///
/// # Errors
///
/// Returns [`ApiError`] on an inverted range or invalid status filter.
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    tag = "Orders",
    summary = "List orders",
    params(OrderListParams, PaginationParams),
    responses(
        (status = 200, description = "Paginated order list", body = OrderListResponse),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
    )
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(filter): Query<OrderListParams>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let status = filter.status.as_deref().map(parse_status).transpose()?;
    let orders = state
        .orders
        .list_orders(OrderFilter {
            from: filter.from,
            to: filter.to,
            station_id: filter.station_id,
            supplier_id: filter.supplier_id,
            status,
        })
        .await?;
    let (data, pagination) = pagination.paginate(orders);
    Ok(Json(OrderListResponse {
        data: data.into_iter().map(OrderResponse::from).collect(),
        pagination,
    }))
}

/// `GET /orders/{id}` — Get one order.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if the order does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    tag = "Orders",
    summary = "Get order details",
    params(("id" = uuid::Uuid, Path, description = "Order UUID")),
    responses(
        (status = 200, description = "Order details", body = OrderResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
    )
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state.orders.get_order(OrderId::from_uuid(id)).await?;
    Ok(Json(OrderResponse::from(order)))
}

/// `PATCH /orders/{id}/status` — Move an order through its lifecycle.
///
/// # Errors
///
/// Returns [`ApiError::InvalidStatusTransition`] on a forbidden move.
#[utoipa::path(
    patch,
    path = "/api/v1/orders/{id}/status",
    tag = "Orders",
    summary = "Update order status",
    description = "Draft orders may be confirmed or cancelled; confirmed orders may be delivered or cancelled. Delivered and cancelled are terminal.",
    params(("id" = uuid::Uuid, Path, description = "Order UUID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = OrderResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 422, description = "Forbidden transition", body = ErrorResponse),
    )
)]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let next = parse_status(&req.status)?;
    let order = state
        .orders
        .update_status(OrderId::from_uuid(id), next)
        .await?;
    Ok(Json(OrderResponse::from(order)))
}

/// Order routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(create_order).get(list_orders))
        .route("/orders/{id}", get(get_order))
        .route("/orders/{id}/status", patch(update_status))
}
