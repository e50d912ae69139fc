//! Purchase order DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common_dto::PaginationMeta;
use crate::domain::{OrderId, PurchaseOrder, StationId, SupplierId};

/// Request body for `POST /orders`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    /// Receiving station.
    pub station_id: StationId,
    /// Selling supplier.
    pub supplier_id: SupplierId,
    /// Fuel discriminator.
    pub fuel: String,
    /// Vehicle discriminator.
    pub vehicle: String,
    /// Ordered volume in liters, as a decimal string.
    pub volume_liters: String,
    /// Negotiated product price per liter, as a decimal string.
    pub product_price_per_liter: String,
    /// Negotiated freight cost per liter, as a decimal string.
    pub freight_cost_per_liter: String,
    /// Business date of the order.
    pub order_date: NaiveDate,
}

/// Order representation in responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    /// Unique order identifier.
    pub id: OrderId,
    /// Receiving station.
    pub station_id: StationId,
    /// Selling supplier.
    pub supplier_id: SupplierId,
    /// Fuel discriminator.
    pub fuel: String,
    /// Vehicle discriminator.
    pub vehicle: String,
    /// Ordered volume in liters, as a decimal string.
    pub volume_liters: String,
    /// Negotiated product price per liter, as a decimal string.
    pub product_price_per_liter: String,
    /// Negotiated freight cost per liter, as a decimal string.
    pub freight_cost_per_liter: String,
    /// Landed total order value, as a decimal string.
    pub total_value: String,
    /// Business date of the order.
    pub order_date: NaiveDate,
    /// Status discriminator.
    pub status: String,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<PurchaseOrder> for OrderResponse {
    fn from(order: PurchaseOrder) -> Self {
        let total_value = order.total_value().to_string();
        Self {
            id: order.id,
            station_id: order.station_id,
            supplier_id: order.supplier_id,
            fuel: order.fuel.as_str().to_string(),
            vehicle: order.vehicle.as_str().to_string(),
            volume_liters: order.volume_liters.to_string(),
            product_price_per_liter: order.product_price_per_liter.to_string(),
            freight_cost_per_liter: order.freight_cost_per_liter.to_string(),
            total_value,
            order_date: order.order_date,
            status: order.status.as_str().to_string(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

/// Paginated list response for `GET /orders`.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderListResponse {
    /// Order rows.
    pub data: Vec<OrderResponse>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// Query parameters for `GET /orders`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct OrderListParams {
    /// Range start (inclusive).
    pub from: NaiveDate,
    /// Range end (inclusive).
    pub to: NaiveDate,
    /// Restrict to one station.
    #[serde(default)]
    pub station_id: Option<StationId>,
    /// Restrict to one supplier.
    #[serde(default)]
    pub supplier_id: Option<SupplierId>,
    /// Restrict to one status discriminator.
    #[serde(default)]
    pub status: Option<String>,
}

/// Request body for `PATCH /orders/{id}/status`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// Target status discriminator.
    pub status: String,
}
