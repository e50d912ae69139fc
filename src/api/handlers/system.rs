//! System endpoints: health check and the static catalog of
//! vocabulary values.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::domain::{Flag, FuelType, OrderStatus, VehicleType};

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Fuel type metadata.
#[derive(Debug, Serialize, ToSchema)]
struct FuelTypeInfo {
    fuel: &'static str,
    label: &'static str,
}

/// Vehicle type metadata.
#[derive(Debug, Serialize, ToSchema)]
struct VehicleTypeInfo {
    vehicle: &'static str,
    capacity_liters: u32,
}

/// Full vocabulary catalog.
#[derive(Debug, Serialize, ToSchema)]
struct CatalogResponse {
    fuel_types: Vec<FuelTypeInfo>,
    vehicle_types: Vec<VehicleTypeInfo>,
    flags: Vec<&'static str>,
    order_statuses: Vec<&'static str>,
}

/// `GET /config/catalog` — List the controlled vocabulary.
#[utoipa::path(
    get,
    path = "/config/catalog",
    tag = "System",
    summary = "List vocabulary values",
    description = "Returns every fuel type, vehicle type, flag, and order status the API accepts, with display metadata.",
    responses(
        (status = 200, description = "Vocabulary catalog", body = CatalogResponse),
    )
)]
pub async fn catalog_handler() -> impl IntoResponse {
    let response = CatalogResponse {
        fuel_types: FuelType::ALL
            .into_iter()
            .map(|f| FuelTypeInfo {
                fuel: f.as_str(),
                label: f.label(),
            })
            .collect(),
        vehicle_types: VehicleType::ALL
            .into_iter()
            .map(|v| VehicleTypeInfo {
                vehicle: v.as_str(),
                capacity_liters: v.capacity_liters(),
            })
            .collect(),
        flags: Flag::ALL.into_iter().map(|f| f.as_str()).collect(),
        order_statuses: OrderStatus::ALL.into_iter().map(|s| s.as_str()).collect(),
    };
    (StatusCode::OK, Json(response))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/catalog", get(catalog_handler))
}
